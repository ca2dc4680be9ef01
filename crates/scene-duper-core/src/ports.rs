//! Seams to the collaborators around the engine: the catalog that supplies
//! scenes, the command that deletes them, and whatever surface shows findings
//! to the operator.

use async_trait::async_trait;

use crate::analysis::{Findings, SideId};
use crate::error::Result;
use crate::model::SceneRecord;
use crate::resolution::DestroyRequest;

/// Fetches the full, ordered scene snapshot in one request.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn all_scenes(&self) -> Result<Vec<SceneRecord>>;
}

/// Deletes one scene. `Ok(false)` and `Err` both mean the command failed.
#[async_trait]
pub trait SceneDeleter: Send + Sync {
    async fn destroy_scene(&self, request: &DestroyRequest) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Info,
}

/// Review surface for one session.
pub trait Presenter: Send + Sync {
    fn show_findings(&self, findings: &Findings);
    fn remove_finding_side(&self, side: SideId);
    fn notify(&self, kind: NoticeKind, message: &str);
}
