//! Structured logger with step summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{Log, StepEntry, StepStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger that emits through [`tracing`] and collects step
/// outcomes for the run summary.
///
/// Console and file output are handled by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber); the logger only
/// remembers the log file path so the summary can point at it.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file: log_file_path(),
        }
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded step entries.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = self.step_entries();
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;

        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                StepStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        let total = ok + skipped + failed;
        self.info(&format!(
            "{total} steps: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.record_step(name, status, message);
    }
}
