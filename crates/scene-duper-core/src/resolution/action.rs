use serde::Serialize;
use std::fmt;

use crate::model::SceneId;

/// The two operator actions offered on every finding side. Both also remove
/// the scene's generated artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolutionAction {
    RemoveSceneKeepFile,
    /// Irreversible: also deletes the source file from disk.
    RemoveSceneAndFile,
}

impl ResolutionAction {
    pub fn deletes_source_file(self) -> bool {
        matches!(self, ResolutionAction::RemoveSceneAndFile)
    }

    pub fn request_for(self, scene_id: &SceneId) -> DestroyRequest {
        DestroyRequest {
            scene_id: scene_id.clone(),
            delete_generated: true,
            delete_file: self.deletes_source_file(),
        }
    }
}

impl fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionAction::RemoveSceneKeepFile => {
                f.write_str("Delete Scene and Generated Files")
            }
            ResolutionAction::RemoveSceneAndFile => {
                f.write_str("Delete Scene, Generated Files, and Local File")
            }
        }
    }
}

/// Parameters of one scene delete command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestroyRequest {
    pub scene_id: SceneId,
    pub delete_generated: bool,
    pub delete_file: bool,
}
