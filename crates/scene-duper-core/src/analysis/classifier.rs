use tracing::debug;

use super::findings::{DuplicateFilePair, DuplicateTitlePair, FileSide, Findings};
use super::identity::{ContentIndex, FileRef, Observation, TitleIndex};
use crate::model::SceneRecord;

/// Single pass over the snapshot in delivery order.
///
/// For each scene: flag it if it has no files, index every file by its first
/// fingerprint of `fingerprint_type`, then index its non-empty title. The
/// first file (or scene) seen for a key becomes the `original` of every later
/// repeat. Files without that fingerprint type and scenes without a title
/// simply do not participate in the respective index.
pub fn classify(scenes: &[SceneRecord], fingerprint_type: &str) -> Findings {
    let mut content_index = ContentIndex::new();
    let mut title_index = TitleIndex::new();
    let mut findings = Findings::default();

    for (scene_idx, scene) in scenes.iter().enumerate() {
        if scene.files.is_empty() {
            findings.zero_file_scenes.push(scene.clone());
        }

        for (file_idx, file) in scene.files.iter().enumerate() {
            let Some(fingerprint) = file.fingerprint(fingerprint_type) else {
                continue;
            };
            let current = FileRef {
                scene: scene_idx,
                file: file_idx,
            };
            if let Observation::Repeat(first) = content_index.observe(&fingerprint.value, current)
            {
                let pair = DuplicateFilePair {
                    original: file_side(scenes, first),
                    duplicate: file_side(scenes, current),
                };
                findings.total_duplicate_bytes =
                    findings.total_duplicate_bytes.saturating_add(pair.combined_size());
                findings.duplicate_files.push(pair);
            }
        }

        if let Some(title) = scene.title() {
            if let Observation::Repeat(first) = title_index.observe(title, scene_idx) {
                findings.duplicate_titles.push(DuplicateTitlePair {
                    original: scenes[first].clone(),
                    duplicate: scene.clone(),
                });
            }
        }
    }

    debug!(
        "Classified {} scenes: {} distinct fingerprints, {} distinct titles",
        scenes.len(),
        content_index.len(),
        title_index.len(),
    );

    findings
}

fn file_side(scenes: &[SceneRecord], at: FileRef) -> FileSide {
    let scene = &scenes[at.scene];
    FileSide {
        scene: scene.clone(),
        file: scene.files[at.file].clone(),
    }
}
