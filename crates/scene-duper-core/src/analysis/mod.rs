pub mod classifier;
pub mod findings;
pub mod identity;

pub use classifier::classify;
pub use findings::{
    DuplicateFilePair, DuplicateTitlePair, FileSide, FindingKind, Findings, SideId, SideRole,
};
