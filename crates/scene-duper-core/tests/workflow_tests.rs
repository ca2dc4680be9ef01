use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use scene_duper_core::analysis::{classify, FindingKind, Findings, SideId, SideRole};
use scene_duper_core::model::{FileRecord, Fingerprint, SceneId, SceneRecord};
use scene_duper_core::ports::{NoticeKind, Presenter, SceneDeleter};
use scene_duper_core::resolution::session::{ALL_RESOLVED, DELETE_FAILED, DELETE_SUCCEEDED};
use scene_duper_core::resolution::{
    DestroyRequest, ResolutionAction, ResolutionOutcome, ReviewSession, SideState,
};
use scene_duper_core::Error;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Shown(usize),
    Removed(SideId),
    Notice(NoticeKind, String),
}

#[derive(Default)]
struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
}

impl RecordingPresenter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn notices(&self, kind: NoticeKind) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notice(k, message) if k == kind => Some(message),
                _ => None,
            })
            .collect()
    }

    fn removed(&self) -> Vec<SideId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Removed(side) => Some(side),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_findings(&self, findings: &Findings) {
        self.events.lock().unwrap().push(Event::Shown(findings.sides().len()));
    }

    fn remove_finding_side(&self, side: SideId) {
        self.events.lock().unwrap().push(Event::Removed(side));
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Notice(kind, message.to_string()));
    }
}

enum Reply {
    Ok(bool),
    Fail,
}

/// Answers per scene id; scenes without a scripted reply succeed.
#[derive(Default)]
struct ScriptedDeleter {
    replies: Mutex<HashMap<SceneId, Reply>>,
    calls: Mutex<Vec<DestroyRequest>>,
}

impl ScriptedDeleter {
    fn reply(self, scene: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(SceneId::from(scene), reply);
        self
    }

    fn calls(&self) -> Vec<DestroyRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneDeleter for ScriptedDeleter {
    async fn destroy_scene(&self, request: &DestroyRequest) -> scene_duper_core::Result<bool> {
        self.calls.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().get(&request.scene_id) {
            Some(Reply::Ok(result)) => Ok(*result),
            Some(Reply::Fail) => Err(Error::GraphQl("scene not found".to_string())),
            None => Ok(true),
        }
    }
}

/// Holds every delete until a permit is released.
struct GatedDeleter {
    gate: Semaphore,
    result: bool,
    calls: Mutex<Vec<DestroyRequest>>,
}

impl GatedDeleter {
    fn new(result: bool) -> Self {
        Self {
            gate: Semaphore::new(0),
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SceneDeleter for GatedDeleter {
    async fn destroy_scene(&self, request: &DestroyRequest) -> scene_duper_core::Result<bool> {
        self.calls.lock().unwrap().push(request.clone());
        self.gate.acquire().await.unwrap().forget();
        Ok(self.result)
    }
}

fn make_scene(id: &str, title: &str, hashes: &[&str]) -> SceneRecord {
    SceneRecord {
        id: SceneId::from(id),
        title: Some(title.to_string()),
        date: None,
        created_at: None,
        updated_at: None,
        files: hashes
            .iter()
            .map(|hash| FileRecord {
                path: format!("/media/{}-{}.mp4", id, hash),
                size: 1_000,
                width: None,
                height: None,
                duration: None,
                fingerprints: vec![Fingerprint {
                    kind: "SHA-256".to_string(),
                    value: hash.to_string(),
                }],
            })
            .collect(),
        paths: Default::default(),
        stash_ids: Vec::new(),
    }
}

/// One file pair (scenes 1 and 2), one zero-file scene (3) and one title
/// pair (scenes 1 and 4).
fn sample_findings() -> Findings {
    let scenes = vec![
        make_scene("1", "Intro", &["abc"]),
        make_scene("2", "Other", &["abc"]),
        make_scene("3", "Empty", &[]),
        make_scene("4", "Intro", &["def"]),
    ];
    classify(&scenes, "SHA-256")
}

fn file_side(role: SideRole) -> SideId {
    SideId::new(FindingKind::DuplicateFile, 0, role)
}

#[tokio::test]
async fn test_session_presents_every_side() {
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(
        sample_findings(),
        Arc::new(ScriptedDeleter::default()),
        presenter.clone(),
    );

    assert_eq!(presenter.events(), vec![Event::Shown(5)]);
    assert_eq!(session.remaining_sides().len(), 5);
    for side in session.remaining_sides() {
        assert_eq!(session.state(side), Some(SideState::Presented));
    }
}

#[tokio::test]
async fn test_failed_delete_keeps_side_and_notifies_once() {
    let deleter = Arc::new(ScriptedDeleter::default().reply("2", Reply::Ok(false)));
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(sample_findings(), deleter.clone(), presenter.clone());

    let side = file_side(SideRole::Duplicate);
    let outcome = session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();

    assert_eq!(outcome, ResolutionOutcome::Failed);
    assert_eq!(session.state(side), Some(SideState::Presented));
    assert!(session.remaining_sides().contains(&side));
    assert_eq!(presenter.notices(NoticeKind::Failure), vec![DELETE_FAILED.to_string()]);
    assert!(presenter.notices(NoticeKind::Success).is_empty());
    assert!(presenter.removed().is_empty());
    assert_eq!(deleter.calls().len(), 1);
}

#[tokio::test]
async fn test_command_error_counts_as_failure() {
    let deleter = Arc::new(ScriptedDeleter::default().reply("3", Reply::Fail));
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(sample_findings(), deleter, presenter.clone());

    let side = SideId::new(FindingKind::ZeroFile, 0, SideRole::Single);
    let outcome = session
        .resolve(side, ResolutionAction::RemoveSceneAndFile)
        .await
        .unwrap();

    assert_eq!(outcome, ResolutionOutcome::Failed);
    assert_eq!(session.state(side), Some(SideState::Presented));
    assert_eq!(presenter.notices(NoticeKind::Failure).len(), 1);
}

#[tokio::test]
async fn test_success_removes_only_that_side() {
    let deleter = Arc::new(ScriptedDeleter::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(sample_findings(), deleter.clone(), presenter.clone());

    let original = file_side(SideRole::Original);
    let duplicate = file_side(SideRole::Duplicate);
    let outcome = session
        .resolve(duplicate, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();

    assert_eq!(outcome, ResolutionOutcome::Resolved);
    assert_eq!(session.state(duplicate), Some(SideState::Resolved));
    assert_eq!(session.state(original), Some(SideState::Presented));
    assert!(!session.remaining_sides().contains(&duplicate));
    assert!(session.remaining_sides().contains(&original));
    assert_eq!(presenter.removed(), vec![duplicate]);
    assert_eq!(presenter.notices(NoticeKind::Success), vec![DELETE_SUCCEEDED.to_string()]);

    // The sibling stays independently actionable.
    let outcome = session
        .resolve(original, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();
    assert_eq!(outcome, ResolutionOutcome::Resolved);
    assert_eq!(presenter.removed(), vec![duplicate, original]);
}

#[tokio::test]
async fn test_resolving_a_scene_keeps_its_other_findings() {
    // Scene 1 is the original of both the file pair and the title pair.
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(
        sample_findings(),
        Arc::new(ScriptedDeleter::default()),
        presenter.clone(),
    );

    session
        .resolve(file_side(SideRole::Original), ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();

    let title_original = SideId::new(FindingKind::DuplicateTitle, 0, SideRole::Original);
    assert_eq!(session.state(title_original), Some(SideState::Presented));
}

#[tokio::test]
async fn test_actions_map_to_delete_flags() {
    let deleter = Arc::new(ScriptedDeleter::default());
    let session = ReviewSession::new(
        sample_findings(),
        deleter.clone(),
        Arc::new(RecordingPresenter::default()),
    );

    session
        .resolve(file_side(SideRole::Original), ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();
    session
        .resolve(
            SideId::new(FindingKind::DuplicateTitle, 0, SideRole::Duplicate),
            ResolutionAction::RemoveSceneAndFile,
        )
        .await
        .unwrap();

    let calls = deleter.calls();
    assert_eq!(
        calls,
        vec![
            DestroyRequest {
                scene_id: SceneId::from("1"),
                delete_generated: true,
                delete_file: false,
            },
            DestroyRequest {
                scene_id: SceneId::from("4"),
                delete_generated: true,
                delete_file: true,
            },
        ]
    );
}

#[tokio::test]
async fn test_unknown_and_resolved_sides_are_rejected() {
    let deleter = Arc::new(ScriptedDeleter::default());
    let session = ReviewSession::new(
        sample_findings(),
        deleter.clone(),
        Arc::new(RecordingPresenter::default()),
    );

    let missing = SideId::new(FindingKind::DuplicateFile, 9, SideRole::Original);
    let err = session
        .resolve(missing, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFindingSide(_)));

    let side = file_side(SideRole::Original);
    session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();
    let err = session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFindingSide(_)));
    assert_eq!(deleter.calls().len(), 1);
}

#[tokio::test]
async fn test_resolve_many_runs_every_action() {
    let deleter = Arc::new(ScriptedDeleter::default().reply("2", Reply::Ok(false)));
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(sample_findings(), deleter.clone(), presenter.clone());

    let zero = SideId::new(FindingKind::ZeroFile, 0, SideRole::Single);
    let results = session
        .resolve_many(&[
            (file_side(SideRole::Duplicate), ResolutionAction::RemoveSceneKeepFile),
            (zero, ResolutionAction::RemoveSceneKeepFile),
        ])
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, file_side(SideRole::Duplicate));
    assert_eq!(*results[0].1.as_ref().unwrap(), ResolutionOutcome::Failed);
    assert_eq!(results[1].0, zero);
    assert_eq!(*results[1].1.as_ref().unwrap(), ResolutionOutcome::Resolved);
    assert_eq!(deleter.calls().len(), 2);
    assert_eq!(presenter.removed(), vec![zero]);
}

#[tokio::test]
async fn test_side_is_pending_while_delete_in_flight() {
    let deleter = Arc::new(GatedDeleter::new(true));
    let session = Arc::new(ReviewSession::new(
        sample_findings(),
        deleter.clone(),
        Arc::new(RecordingPresenter::default()),
    ));

    let side = file_side(SideRole::Duplicate);
    let task = tokio::spawn({
        let session = session.clone();
        async move { session.resolve(side, ResolutionAction::RemoveSceneKeepFile).await }
    });

    while deleter.call_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(session.state(side), Some(SideState::Pending));
    assert!(session.remaining_sides().contains(&side));

    deleter.gate.add_permits(1);
    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome, ResolutionOutcome::Resolved);
    assert_eq!(session.state(side), Some(SideState::Resolved));
}

#[tokio::test]
async fn test_double_dispatch_is_not_guarded() {
    let deleter = Arc::new(GatedDeleter::new(true));
    let presenter = Arc::new(RecordingPresenter::default());
    let session = Arc::new(ReviewSession::new(
        sample_findings(),
        deleter.clone(),
        presenter.clone(),
    ));

    let side = file_side(SideRole::Original);
    let spawn_resolve = || {
        let session = session.clone();
        tokio::spawn(async move {
            session.resolve(side, ResolutionAction::RemoveSceneKeepFile).await
        })
    };
    let first = spawn_resolve();
    let second = spawn_resolve();

    while deleter.call_count() < 2 {
        tokio::task::yield_now().await;
    }
    deleter.gate.add_permits(2);

    assert_eq!(first.await.unwrap().unwrap(), ResolutionOutcome::Resolved);
    assert_eq!(second.await.unwrap().unwrap(), ResolutionOutcome::Resolved);
    assert_eq!(deleter.call_count(), 2);
    assert_eq!(presenter.removed(), vec![side]);
}

#[tokio::test]
async fn test_failed_side_can_be_retried_manually() {
    let deleter = Arc::new(GatedDeleter::new(false));
    let session = Arc::new(ReviewSession::new(
        sample_findings(),
        deleter.clone(),
        Arc::new(RecordingPresenter::default()),
    ));

    let side = SideId::new(FindingKind::DuplicateTitle, 0, SideRole::Duplicate);
    deleter.gate.add_permits(2);

    let first = session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();
    assert_eq!(first, ResolutionOutcome::Failed);
    assert_eq!(session.state(side), Some(SideState::Presented));

    let second = session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();
    assert_eq!(second, ResolutionOutcome::Failed);
    assert_eq!(deleter.call_count(), 2);
}

#[tokio::test]
async fn test_last_resolution_announces_empty_review() {
    let findings = classify(&[make_scene("9", "Lonely", &[])], "SHA-256");
    let presenter = Arc::new(RecordingPresenter::default());
    let session = ReviewSession::new(
        findings,
        Arc::new(ScriptedDeleter::default()),
        presenter.clone(),
    );

    let side = SideId::new(FindingKind::ZeroFile, 0, SideRole::Single);
    session
        .resolve(side, ResolutionAction::RemoveSceneKeepFile)
        .await
        .unwrap();

    assert!(session.remaining_sides().is_empty());
    assert_eq!(presenter.notices(NoticeKind::Info), vec![ALL_RESOLVED.to_string()]);
}
