use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::{FileRecord, SceneRecord};

/// A file together with the scene that owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSide {
    pub scene: SceneRecord,
    pub file: FileRecord,
}

/// Two files sharing a fingerprint value of the matched type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateFilePair {
    pub original: FileSide,
    pub duplicate: FileSide,
}

impl DuplicateFilePair {
    pub fn combined_size(&self) -> u64 {
        self.original.file.size.saturating_add(self.duplicate.file.size)
    }

    /// Strictly smaller side, if the sizes differ.
    pub fn smaller_side(&self) -> Option<SideRole> {
        smaller(Some(self.original.file.size), Some(self.duplicate.file.size))
    }

    /// True when both files belong to the same scene.
    pub fn is_self_duplicate(&self) -> bool {
        self.original.scene.id == self.duplicate.scene.id
    }
}

/// Two scenes sharing a non-empty title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateTitlePair {
    pub original: SceneRecord,
    pub duplicate: SceneRecord,
}

impl DuplicateTitlePair {
    /// Compares first-file sizes; a scene without files is never the smaller side.
    pub fn smaller_side(&self) -> Option<SideRole> {
        smaller(
            self.original.primary_file_size(),
            self.duplicate.primary_file_size(),
        )
    }
}

fn smaller(original: Option<u64>, duplicate: Option<u64>) -> Option<SideRole> {
    match (original, duplicate) {
        (Some(a), Some(b)) if a < b => Some(SideRole::Original),
        (Some(a), Some(b)) if b < a => Some(SideRole::Duplicate),
        _ => None,
    }
}

/// Result of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Findings {
    pub duplicate_files: Vec<DuplicateFilePair>,
    pub duplicate_titles: Vec<DuplicateTitlePair>,
    pub zero_file_scenes: Vec<SceneRecord>,
    /// Sum of both sizes over every duplicate file pair.
    pub total_duplicate_bytes: u64,
}

impl Findings {
    pub fn is_empty(&self) -> bool {
        self.duplicate_files.is_empty()
            && self.duplicate_titles.is_empty()
            && self.zero_file_scenes.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.duplicate_files.len() + self.duplicate_titles.len() + self.zero_file_scenes.len()
    }

    /// Every actionable side, in presentation order: file pairs, zero-file
    /// scenes, then title pairs.
    pub fn sides(&self) -> Vec<SideId> {
        let mut sides = Vec::with_capacity(
            self.duplicate_files.len() * 2
                + self.zero_file_scenes.len()
                + self.duplicate_titles.len() * 2,
        );
        for index in 0..self.duplicate_files.len() {
            sides.push(SideId::new(FindingKind::DuplicateFile, index, SideRole::Original));
            sides.push(SideId::new(FindingKind::DuplicateFile, index, SideRole::Duplicate));
        }
        for index in 0..self.zero_file_scenes.len() {
            sides.push(SideId::new(FindingKind::ZeroFile, index, SideRole::Single));
        }
        for index in 0..self.duplicate_titles.len() {
            sides.push(SideId::new(FindingKind::DuplicateTitle, index, SideRole::Original));
            sides.push(SideId::new(FindingKind::DuplicateTitle, index, SideRole::Duplicate));
        }
        sides
    }

    /// Scene referenced by a side, or `None` if the side does not exist.
    pub fn scene_for(&self, side: &SideId) -> Option<&SceneRecord> {
        match (side.kind, side.role) {
            (FindingKind::DuplicateFile, SideRole::Original) => {
                self.duplicate_files.get(side.index).map(|p| &p.original.scene)
            }
            (FindingKind::DuplicateFile, SideRole::Duplicate) => {
                self.duplicate_files.get(side.index).map(|p| &p.duplicate.scene)
            }
            (FindingKind::DuplicateTitle, SideRole::Original) => {
                self.duplicate_titles.get(side.index).map(|p| &p.original)
            }
            (FindingKind::DuplicateTitle, SideRole::Duplicate) => {
                self.duplicate_titles.get(side.index).map(|p| &p.duplicate)
            }
            (FindingKind::ZeroFile, SideRole::Single) => self.zero_file_scenes.get(side.index),
            _ => None,
        }
    }

    /// File shown and compared for a side: the matched file of a file pair,
    /// otherwise the scene's first file.
    pub fn file_for(&self, side: &SideId) -> Option<&FileRecord> {
        match (side.kind, side.role) {
            (FindingKind::DuplicateFile, SideRole::Original) => {
                self.duplicate_files.get(side.index).map(|p| &p.original.file)
            }
            (FindingKind::DuplicateFile, SideRole::Duplicate) => {
                self.duplicate_files.get(side.index).map(|p| &p.duplicate.file)
            }
            _ => self.scene_for(side).and_then(|scene| scene.files.first()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FindingKind {
    DuplicateFile,
    ZeroFile,
    DuplicateTitle,
}

impl FindingKind {
    fn prefix(self) -> char {
        match self {
            FindingKind::DuplicateFile => 'F',
            FindingKind::ZeroFile => 'Z',
            FindingKind::DuplicateTitle => 'T',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FindingKind::DuplicateFile => "duplicate_file",
            FindingKind::ZeroFile => "zero_file",
            FindingKind::DuplicateTitle => "duplicate_title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SideRole {
    Original,
    Duplicate,
    /// The only side of a zero-file finding.
    Single,
}

impl SideRole {
    pub fn label(self) -> &'static str {
        match self {
            SideRole::Original => "original",
            SideRole::Duplicate => "duplicate",
            SideRole::Single => "single",
        }
    }
}

/// Identifies one actionable side of one finding.
///
/// Rendered 1-based as `F3a`/`F3b` for file pairs, `T1a`/`T1b` for title
/// pairs and `Z2` for zero-file scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SideId {
    pub kind: FindingKind,
    pub index: usize,
    pub role: SideRole,
}

impl SideId {
    pub fn new(kind: FindingKind, index: usize, role: SideRole) -> Self {
        Self { kind, index, role }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index + 1)?;
        match self.role {
            SideRole::Original => f.write_str("a"),
            SideRole::Duplicate => f.write_str("b"),
            SideRole::Single => Ok(()),
        }
    }
}

impl FromStr for SideId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownFindingSide(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let kind = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('F') => FindingKind::DuplicateFile,
            Some('T') => FindingKind::DuplicateTitle,
            Some('Z') => FindingKind::ZeroFile,
            _ => return Err(unknown()),
        };
        let rest = chars.as_str();
        let (digits, role) = match (kind, rest.chars().last().map(|c| c.to_ascii_lowercase())) {
            (FindingKind::ZeroFile, _) => (rest, SideRole::Single),
            (_, Some('a')) => (&rest[..rest.len() - 1], SideRole::Original),
            (_, Some('b')) => (&rest[..rest.len() - 1], SideRole::Duplicate),
            _ => return Err(unknown()),
        };
        let number: usize = digits.parse().map_err(|_| unknown())?;
        if number == 0 {
            return Err(unknown());
        }
        Ok(SideId::new(kind, number - 1, role))
    }
}
