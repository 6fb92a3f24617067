//! Core logging types: step entries, status, and the [`Log`] trait.

/// Pipeline step result for summary reporting.
#[derive(Debug, Clone)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: StepStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully.
    Ok,
    /// Step did not apply to this configuration.
    Skipped,
    /// Step encountered an error and the run stopped.
    Failed,
}

/// Event sink shared by every pipeline stage.
///
/// Both [`Logger`](super::logger::Logger) (console and file output) and
/// [`BufferedLog`](super::buffered::BufferedLog) (in-memory capture)
/// implement this trait, so stages report warnings without knowing where
/// they end up.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}
