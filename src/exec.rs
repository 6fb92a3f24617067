//! Thin wrapper over [`std::process::Command`] for the external tools the
//! assembler drives (`git`, `npm`, `npx`).
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl ExecResult {
    /// Most useful diagnostic text: stderr, falling back to stdout.
    #[must_use]
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {label}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{label} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.diagnostic()
        );
    }
    Ok(result)
}

/// Run a command and return its output. Fails if the command exits non-zero.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits non-zero.
pub fn run(program: &str, args: &[&str]) -> Result<ExecResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    execute_checked(cmd, program)
}

/// Run a command in a specific directory.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits non-zero.
pub fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    execute_checked(cmd, &format!("{program} in {}", dir.display()))
}

/// Check if a program is available on PATH.
#[must_use]
pub fn which(program: &str) -> bool {
    which::which(program).is_ok()
}
