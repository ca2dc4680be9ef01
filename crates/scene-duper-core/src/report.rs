use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

use crate::analysis::Findings;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    kind: &'static str,
    finding: String,
    role: &'static str,
    scene_id: &'a str,
    title: &'a str,
    file_path: Option<&'a str>,
    file_size: Option<u64>,
    fingerprint: Option<&'a str>,
}

pub fn default_report_name(now: DateTime<Local>) -> String {
    format!("scene-duper-report-{}.csv", now.format("%Y%m%d-%H%M%S"))
}

/// Writes one CSV row per finding side. Returns the number of rows written.
pub fn write_csv<W: io::Write>(
    findings: &Findings,
    fingerprint_type: &str,
    writer: W,
) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for side in findings.sides() {
        let Some(scene) = findings.scene_for(&side) else {
            continue;
        };
        let file = findings.file_for(&side);
        csv_writer.serialize(ReportRow {
            kind: side.kind.label(),
            finding: side.to_string(),
            role: side.role.label(),
            scene_id: scene.id.as_str(),
            title: scene.title().unwrap_or_default(),
            file_path: file.map(|f| f.path.as_str()),
            file_size: file.map(|f| f.size),
            fingerprint: file
                .and_then(|f| f.fingerprint(fingerprint_type))
                .map(|fp| fp.value.as_str()),
        })?;
        rows += 1;
    }

    csv_writer.flush()?;
    Ok(rows)
}

pub fn export_csv(findings: &Findings, fingerprint_type: &str, path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let rows = write_csv(findings, fingerprint_type, file)?;
    info!("Wrote {} finding rows to {}", rows, path.display());
    Ok(rows)
}
