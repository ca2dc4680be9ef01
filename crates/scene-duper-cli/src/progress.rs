use indicatif::{ProgressBar, ProgressStyle};
use scene_duper_core::CheckReporter;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter: a spinner per phase, a check mark line when it ends.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl CheckReporter for CliReporter {
    fn on_fetch_start(&self) {
        self.start_spinner("Fetching scenes...");
    }

    fn on_fetch_complete(&self, scenes: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Fetch complete: {} scenes in {:.2}s",
            scenes, duration_secs
        );
    }

    fn on_fetch_failed(&self) {
        self.finish_bar();
        eprintln!("  \x1b[31m✗\x1b[0m Fetch failed");
    }

    fn on_classify_start(&self) {
        self.start_spinner("Checking for issues...");
    }

    fn on_classify_complete(&self, findings: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Check complete: {} findings in {:.2}s",
            findings, duration_secs
        );
    }
}
