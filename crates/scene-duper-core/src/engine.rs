use crate::analysis::{self, Findings};
use crate::config::AppConfig;
use crate::error::Error;
use crate::ports::CatalogQuery;
use crate::progress::CheckReporter;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub struct CheckEngine {
    config: AppConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckStats {
    pub scenes_checked: usize,
    pub files_checked: usize,
}

#[derive(Debug)]
pub struct CheckReport {
    pub fetch_duration: Duration,
    pub classify_duration: Duration,
    pub stats: CheckStats,
    pub findings: Findings,
}

/// A check either finds something to review or reports a clean catalog.
#[derive(Debug)]
pub enum CheckOutcome {
    NoIssuesFound(CheckStats),
    IssuesFound(CheckReport),
}

impl CheckEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the check pipeline:
    /// 1. Fetch the full scene snapshot from the catalog
    /// 2. Classify it in one pass (content duplicates, title duplicates, zero-file scenes)
    ///
    /// A failed fetch aborts with no findings.
    pub async fn check(
        &self,
        catalog: &dyn CatalogQuery,
        reporter: &dyn CheckReporter,
    ) -> Result<CheckOutcome, Error> {
        // Phase 1: Fetch
        info!("Fetching scenes...");
        reporter.on_fetch_start();
        let fetch_start = Instant::now();
        let scenes = match catalog.all_scenes().await {
            Ok(scenes) => scenes,
            Err(err) => {
                error!("Error fetching scenes: {}", err);
                reporter.on_fetch_failed();
                return Err(err);
            }
        };
        let fetch_duration = fetch_start.elapsed();
        reporter.on_fetch_complete(scenes.len(), fetch_duration.as_secs_f64());

        let stats = CheckStats {
            scenes_checked: scenes.len(),
            files_checked: scenes.iter().map(|s| s.files.len()).sum(),
        };
        debug!(
            "Fetch completed in {:.2}s: {} scenes, {} files",
            fetch_duration.as_secs_f64(),
            stats.scenes_checked,
            stats.files_checked,
        );

        // Phase 2: Classify
        reporter.on_classify_start();
        let classify_start = Instant::now();
        let findings = analysis::classify(&scenes, &self.config.fingerprint_type);
        let classify_duration = classify_start.elapsed();
        reporter.on_classify_complete(findings.finding_count(), classify_duration.as_secs_f64());
        debug!(
            "Classify completed in {:.2}s: {} duplicate files, {} duplicate titles, {} without files",
            classify_duration.as_secs_f64(),
            findings.duplicate_files.len(),
            findings.duplicate_titles.len(),
            findings.zero_file_scenes.len(),
        );

        if findings.is_empty() {
            info!("No issues found in {} scenes", stats.scenes_checked);
            return Ok(CheckOutcome::NoIssuesFound(stats));
        }

        Ok(CheckOutcome::IssuesFound(CheckReport {
            fetch_duration,
            classify_duration,
            stats,
            findings,
        }))
    }
}
