//! In-memory logger that keeps every event for later inspection.
use std::sync::Mutex;

use super::types::{Log, StepEntry, StepStatus};

/// Severity of a buffered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A stage header entry.
    Stage,
    /// An informational entry.
    Info,
    /// A debug entry.
    Debug,
    /// A warning entry.
    Warn,
    /// An error entry.
    Error,
}

/// Buffer each message of the named methods as the matching [`LogLevel`].
macro_rules! buffer_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push((LogLevel::$level, msg.to_string()));
                }
            }
        )+
    };
}

/// A [`Log`] that records entries in memory instead of printing them.
///
/// Library callers use it to run the pipeline quietly and inspect the
/// warnings afterwards.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
    steps: Mutex<Vec<StepEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All buffered `(level, message)` pairs in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages logged at `level`, in emission order.
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Shorthand for `messages(LogLevel::Warn)`.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    /// Recorded step results.
    #[must_use]
    pub fn steps(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

impl Log for BufferedLog {
    buffer_log_methods!(
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
    );

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
