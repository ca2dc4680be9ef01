/// Trait for reporting check progress.
///
/// CLI implements with tracing/indicatif. All methods have default no-op implementations.
pub trait CheckReporter: Send + Sync {
    fn on_fetch_start(&self) {}
    fn on_fetch_complete(&self, _scenes: usize, _duration_secs: f64) {}
    fn on_fetch_failed(&self) {}
    fn on_classify_start(&self) {}
    fn on_classify_complete(&self, _findings: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl CheckReporter for SilentReporter {}
