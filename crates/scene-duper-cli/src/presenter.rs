use colored::*;
use scene_duper_core::analysis::{FindingKind, Findings, SideId, SideRole};
use scene_duper_core::format::{format_duration, format_file_size};
use scene_duper_core::model::{FileRecord, SceneRecord};
use scene_duper_core::ports::{NoticeKind, Presenter};
use scene_duper_core::resolution::ResolutionAction;

/// Prints findings to stdout. Each side is labelled with the id accepted by
/// the review prompt.
pub struct TerminalPresenter {
    interactive: bool,
}

impl TerminalPresenter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    fn print_scene(
        &self,
        side: SideId,
        heading: &str,
        scene: &SceneRecord,
        size: Option<u64>,
        highlight: bool,
    ) {
        let label = format!("[{}]", side);
        let label = if highlight {
            label.green().bold()
        } else {
            label.bold()
        };
        let size = size.map(format_file_size).unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} {} (ID: {}) {}",
            label,
            heading.dimmed(),
            scene.title().unwrap_or("<untitled>"),
            scene.id,
            if highlight { size.green() } else { size.normal() },
        );
        println!(
            "      Date: {}  Created: {}  Updated: {}",
            scene.date.as_deref().unwrap_or("-"),
            scene.created_at.as_deref().unwrap_or("-"),
            scene.updated_at.as_deref().unwrap_or("-"),
        );
        if let Some(screenshot) = &scene.paths.screenshot {
            println!("      Screenshot: {}", screenshot.dimmed());
        }
        for file in &scene.files {
            print_file(file);
        }
    }
}

/// Size shown next to a side; the same file its highlight was compared on.
fn displayed_size(findings: &Findings, side: &SideId) -> Option<u64> {
    findings.file_for(side).map(|file| file.size)
}

fn print_file(file: &FileRecord) {
    let fingerprints: Vec<String> = file
        .fingerprints
        .iter()
        .map(|fp| format!("{}: {}", fp.kind, fp.value))
        .collect();
    println!("      - {}", file.path);
    println!(
        "        {}  {}x{}  {}  {}",
        format_file_size(file.size),
        file.width.unwrap_or_default(),
        file.height.unwrap_or_default(),
        format_duration(file.duration.unwrap_or_default()),
        fingerprints.join(", ").dimmed(),
    );
}

impl Presenter for TerminalPresenter {
    fn show_findings(&self, findings: &Findings) {
        println!();
        println!("{}", "Review Results".bold().underline());
        println!("Total Scene Pairings: {}", findings.duplicate_titles.len());
        println!(
            "Space held by duplicate files: {}",
            format_file_size(findings.total_duplicate_bytes).red()
        );

        if !findings.duplicate_files.is_empty() {
            println!();
            println!("{}", "Duplicate Files".cyan().bold());
            for (index, pair) in findings.duplicate_files.iter().enumerate() {
                let smaller = pair.smaller_side();
                if pair.is_self_duplicate() {
                    println!("  {}", "Both files belong to the same scene".yellow());
                }
                for (role, side) in [
                    (SideRole::Original, &pair.original),
                    (SideRole::Duplicate, &pair.duplicate),
                ] {
                    let heading = match role {
                        SideRole::Original => "Original Scene:",
                        _ => "Duplicate Scene:",
                    };
                    let id = SideId::new(FindingKind::DuplicateFile, index, role);
                    self.print_scene(
                        id,
                        heading,
                        &side.scene,
                        displayed_size(findings, &id),
                        smaller == Some(role),
                    );
                    println!("      Matched file: {}", side.file.path);
                }
                println!();
            }
        }

        if !findings.zero_file_scenes.is_empty() {
            println!();
            println!("{}", "Scenes with No Files".cyan().bold());
            for (index, scene) in findings.zero_file_scenes.iter().enumerate() {
                let id = SideId::new(FindingKind::ZeroFile, index, SideRole::Single);
                self.print_scene(id, "Scene:", scene, displayed_size(findings, &id), false);
            }
        }

        if !findings.duplicate_titles.is_empty() {
            println!();
            println!("{}", "Duplicate Scene Titles".cyan().bold());
            for (index, pair) in findings.duplicate_titles.iter().enumerate() {
                let smaller = pair.smaller_side();
                let original = SideId::new(FindingKind::DuplicateTitle, index, SideRole::Original);
                let duplicate = SideId::new(FindingKind::DuplicateTitle, index, SideRole::Duplicate);
                self.print_scene(
                    original,
                    "Original Scene:",
                    &pair.original,
                    displayed_size(findings, &original),
                    smaller == Some(SideRole::Original),
                );
                self.print_scene(
                    duplicate,
                    "Duplicate Scene:",
                    &pair.duplicate,
                    displayed_size(findings, &duplicate),
                    smaller == Some(SideRole::Duplicate),
                );
                println!();
            }
        }

        if !self.interactive {
            return;
        }
        println!(
            "Actions: keep <SIDE>... = {}; purge <SIDE>... = {}",
            ResolutionAction::RemoveSceneKeepFile,
            ResolutionAction::RemoveSceneAndFile.to_string().red(),
        );
    }

    fn remove_finding_side(&self, side: SideId) {
        println!("  {} removed from review", format!("[{}]", side).dimmed());
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => println!("  {} {}", "✓".green(), message.green()),
            NoticeKind::Failure => println!("  {} {}", "✗".red(), message.red()),
            NoticeKind::Info => println!("  {}", message),
        }
    }
}
