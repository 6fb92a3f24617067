use std::process::ExitCode;

use biolink_cli::{cli, commands, logging};
use clap::Parser;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    match commands::build::run(&args.build, &log) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
