use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use super::action::ResolutionAction;
use crate::analysis::{Findings, SideId};
use crate::error::{Error, Result};
use crate::ports::{NoticeKind, Presenter, SceneDeleter};

pub const DELETE_SUCCEEDED: &str = "Scene deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete scene";
pub const ALL_RESOLVED: &str = "All findings resolved";

/// Lifecycle of one finding side within a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideState {
    Presented,
    /// At least one delete command for this side is in flight.
    Pending,
    /// Removed from the presentation after a successful delete.
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved,
    Failed,
}

#[derive(Debug)]
struct SideEntry {
    state: SideState,
    in_flight: usize,
}

/// Drives operator-chosen deletes against one findings snapshot.
///
/// Each side is resolved independently: a successful delete removes only that
/// side, its sibling stays actionable. Nothing guards against dispatching the
/// same side twice; callers that need debouncing must do it themselves.
pub struct ReviewSession {
    findings: Findings,
    deleter: Arc<dyn SceneDeleter>,
    presenter: Arc<dyn Presenter>,
    sides: Mutex<BTreeMap<SideId, SideEntry>>,
}

impl ReviewSession {
    /// Registers every side as presented and hands the snapshot to the presenter.
    pub fn new(
        findings: Findings,
        deleter: Arc<dyn SceneDeleter>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let sides = findings
            .sides()
            .into_iter()
            .map(|side| {
                (
                    side,
                    SideEntry {
                        state: SideState::Presented,
                        in_flight: 0,
                    },
                )
            })
            .collect();

        presenter.show_findings(&findings);

        Self {
            findings,
            deleter,
            presenter,
            sides: Mutex::new(sides),
        }
    }

    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    pub fn state(&self, side: SideId) -> Option<SideState> {
        self.lock().get(&side).map(|entry| entry.state)
    }

    /// Sides that are still shown, in presentation order.
    pub fn remaining_sides(&self) -> Vec<SideId> {
        let sides = self.lock();
        self.findings
            .sides()
            .into_iter()
            .filter(|side| {
                sides
                    .get(side)
                    .is_some_and(|entry| entry.state != SideState::Resolved)
            })
            .collect()
    }

    /// Dispatches one delete for `side` and reconciles its state.
    ///
    /// Command failures are reported to the presenter and returned as
    /// [`ResolutionOutcome::Failed`]; only an unknown or already resolved side
    /// is an `Err`.
    pub async fn resolve(
        &self,
        side: SideId,
        action: ResolutionAction,
    ) -> Result<ResolutionOutcome> {
        let request = {
            let mut sides = self.lock();
            let entry = match sides.get_mut(&side) {
                Some(entry) if entry.state != SideState::Resolved => entry,
                _ => return Err(Error::UnknownFindingSide(side.to_string())),
            };
            let scene = self
                .findings
                .scene_for(&side)
                .ok_or_else(|| Error::UnknownFindingSide(side.to_string()))?;
            entry.state = SideState::Pending;
            entry.in_flight += 1;
            action.request_for(&scene.id)
        };

        info!("{}: {} (scene {})", side, action, request.scene_id);
        let succeeded = match self.deleter.destroy_scene(&request).await {
            Ok(result) => result,
            Err(err) => {
                warn!("Delete of scene {} failed: {}", request.scene_id, err);
                false
            }
        };

        let (removed, all_resolved) = {
            let mut sides = self.lock();
            let entry = sides
                .get_mut(&side)
                .ok_or_else(|| Error::UnknownFindingSide(side.to_string()))?;
            entry.in_flight = entry.in_flight.saturating_sub(1);
            let removed = if succeeded {
                let first_success = entry.state != SideState::Resolved;
                entry.state = SideState::Resolved;
                first_success
            } else {
                if entry.state == SideState::Pending && entry.in_flight == 0 {
                    entry.state = SideState::Presented;
                }
                false
            };
            let all_resolved = sides.values().all(|e| e.state == SideState::Resolved);
            (removed, all_resolved)
        };

        if succeeded {
            if removed {
                self.presenter.remove_finding_side(side);
            }
            self.presenter.notify(NoticeKind::Success, DELETE_SUCCEEDED);
            if removed && all_resolved {
                self.presenter.notify(NoticeKind::Info, ALL_RESOLVED);
            }
            Ok(ResolutionOutcome::Resolved)
        } else {
            warn!("{}: scene {} was not deleted", side, request.scene_id);
            self.presenter.notify(NoticeKind::Failure, DELETE_FAILED);
            Ok(ResolutionOutcome::Failed)
        }
    }

    /// Dispatches all actions concurrently. Completion order is unspecified;
    /// results are returned in request order.
    pub async fn resolve_many(
        &self,
        actions: &[(SideId, ResolutionAction)],
    ) -> Vec<(SideId, Result<ResolutionOutcome>)> {
        let pending = actions.iter().map(|(side, action)| async move {
            (*side, self.resolve(*side, *action).await)
        });
        join_all(pending).await
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<SideId, SideEntry>> {
        self.sides.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
