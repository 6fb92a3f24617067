//! Logging infrastructure for structured console and file output.

mod buffered;
mod logger;
mod subscriber;
mod types;
mod utils;

pub use buffered::{BufferedLog, LogLevel};
pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, StepEntry, StepStatus};
