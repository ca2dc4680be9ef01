pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod ports;
pub mod progress;
pub mod report;
pub mod resolution;
pub mod stash;
pub mod tasks;

pub use config::AppConfig;
pub use engine::{CheckEngine, CheckOutcome, CheckReport, CheckStats};
pub use error::{Error, Result};
pub use progress::{CheckReporter, SilentReporter};
