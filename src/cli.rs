use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::DEFAULT_CONFIG_PATH;

/// Output directory used when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Top-level CLI entry point for the profile site generator.
#[derive(Parser, Debug)]
#[command(
    name = "biolink",
    about = "Generate a link-in-bio profile site from a YAML configuration",
    version = option_env!("BIOLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub build: BuildOpts,
}

/// Options for a site build.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BuildOpts {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub input: PathBuf,

    /// Output directory (must not exist)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Template git URL or local directory [default: built-in template repository]
    #[arg(long, value_name = "SOURCE")]
    pub template: Option<String>,

    /// Resources directory [default: `resources` next to the configuration file]
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Fail when a token is left unsubstituted or unused by the template
    #[arg(long)]
    pub strict: bool,
}

impl BuildOpts {
    /// Options for `input` → `output` with every other setting defaulted.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            template: None,
            resources: None,
            strict: false,
        }
    }

    /// Resources directory, defaulting to `resources` beside the input file.
    #[must_use]
    pub fn resources_dir(&self) -> PathBuf {
        self.resources.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .unwrap_or_else(|| std::path::Path::new(""))
                .join(crate::resources::RESOURCES_DIR_NAME)
        })
    }
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_DIR)
    }
}
