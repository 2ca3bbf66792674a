use super::*;
use crate::model::context::PromptMessages;
use crate::model::snapshot::{RoleView, StaffPayload};
use crate::model::submission::SubmissionRecord;
use crate::requests::{ActionResponse, ChangeCohortRequest};
use std::cell::RefCell;
use std::collections::VecDeque;

// =========================================================================
// MockApi
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(String),
    ChangeCohort(String),
    SubmitLink(String),
    Validate(String),
}

/// In-memory stand-in for the widget handlers. Mutations succeed and update
/// `payload` unless a scripted reply is queued or a `fail_*` switch is set.
#[derive(Default)]
struct MockApi {
    calls: RefCell<Vec<Call>>,
    payload: RefCell<StaffPayload>,
    replies: RefCell<VecDeque<ActionResponse>>,
    fail_load: bool,
    fail_change_cohort: bool,
    fail_submit: bool,
    fail_validate: bool,
}

impl MockApi {
    fn with_payload(payload: StaffPayload) -> Self {
        Self {
            payload: RefCell::new(payload),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn queue_reply(&self, reply: ActionResponse) {
        self.replies.borrow_mut().push_back(reply);
    }

    fn next_reply(&self) -> Option<ActionResponse> {
        self.replies.borrow_mut().pop_front()
    }
}

impl WidgetApi for MockApi {
    async fn load_submissions(&self, cohort: &str) -> Result<StaffPayload, ApiError> {
        self.calls.borrow_mut().push(Call::Load(cohort.to_string()));
        if self.fail_load {
            return Err(ApiError::Status(502));
        }
        let mut payload = self.payload.borrow().clone();
        payload.cohort = Some(cohort.to_string()).filter(|c| !c.is_empty());
        Ok(payload)
    }

    async fn change_cohort(&self, request: &ChangeCohortRequest) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::ChangeCohort(request.cohort.clone()));
        if self.fail_change_cohort {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(())
    }

    async fn submit_link(&self, request: &SubmitLinkRequest) -> Result<ActionResponse, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::SubmitLink(request.link.clone()));
        if self.fail_submit {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(self.next_reply().unwrap_or_else(ActionResponse::ok))
    }

    async fn validate_submission(
        &self,
        request: &ValidateSubmissionRequest,
    ) -> Result<ActionResponse, ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::Validate(request.user_id.clone()));
        if self.fail_validate {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        if let Some(reply) = self.next_reply() {
            return Ok(reply);
        }
        for record in &mut self.payload.borrow_mut().submissions {
            if record.user_id == request.user_id {
                record.validated = true;
                record.validated_by = Some("staff".to_string());
            }
        }
        Ok(ActionResponse::ok())
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn context(role: Role, is_course_cohorted: bool) -> WidgetContext {
    WidgetContext {
        xblock_id: "abc123".to_string(),
        handler_base: "/api/forum_task/abc123/users/u/handler".to_string(),
        role,
        is_course_cohorted,
        cohort: None,
        messages: PromptMessages::default(),
        submission: LearnerSubmission::Unsubmitted,
    }
}

fn record(user_id: &str, validated: bool) -> SubmissionRecord {
    SubmissionRecord {
        submission_id: format!("sub-{user_id}"),
        user_id: user_id.to_string(),
        timestamp: "05/03/2024 14:02:11".to_string(),
        link: format!("https://forum.treetree2.school/t/{user_id}"),
        validated,
        validated_by: validated.then(|| "staff".to_string()),
    }
}

fn staff_payload() -> StaffPayload {
    StaffPayload {
        submissions: vec![record("42", false), record("7", true)],
        not_submitted: vec!["9".to_string()],
        is_course_cohorted: true,
        cohorts: vec![String::new(), "T1".to_string(), "T2".to_string()],
        ..StaffPayload::default()
    }
}

fn learner() -> ForumTaskController<MockApi> {
    ForumTaskController::new(MockApi::default(), context(Role::Learner, false))
}

fn staff() -> ForumTaskController<MockApi> {
    ForumTaskController::new(
        MockApi::with_payload(staff_payload()),
        context(Role::Staff, true),
    )
}

// =========================================================================
// sync
// =========================================================================

#[tokio::test]
async fn learner_sync_renders_from_context_without_network() {
    let controller = learner();
    let snapshot = controller.sync().await.unwrap();

    assert_eq!(snapshot.role(), Role::Learner);
    assert!(snapshot.submissions().is_none());
    assert!(snapshot.learner_submission_link().is_none());
    assert!(controller.api().calls().is_empty());
}

#[tokio::test]
async fn staff_sync_loads_submissions() {
    let controller = staff();
    let snapshot = controller.sync().await.unwrap();

    assert_eq!(snapshot.role(), Role::Staff);
    assert!(snapshot.learner_submission_link().is_none());
    assert_eq!(snapshot.submissions().map(<[_]>::len), Some(2));
    assert_eq!(controller.api().calls(), vec![Call::Load(String::new())]);
}

#[tokio::test]
async fn staff_filter_starts_from_mount_context() {
    let mut ctx = context(Role::Staff, true);
    ctx.cohort = Some("T2".to_string());
    let controller = ForumTaskController::new(MockApi::with_payload(staff_payload()), ctx);

    let snapshot = controller.sync().await.unwrap();
    assert_eq!(snapshot.current_cohort(), Some("T2"));
    assert_eq!(controller.api().calls(), vec![Call::Load("T2".to_string())]);
}

// =========================================================================
// submit_link
// =========================================================================

#[tokio::test]
async fn accepted_link_moves_learner_to_submitted() {
    let controller = learner();
    let snapshot = controller
        .submit_link("https://forum.treetree2.school/x")
        .await
        .unwrap();

    assert_eq!(
        snapshot.learner_submission_link(),
        Some("https://forum.treetree2.school/x")
    );
    let RoleView::Learner(view) = &snapshot.view else {
        panic!("expected learner view");
    };
    assert!(!view.submission.shows_form());
    assert_eq!(view.prompt, PromptMessages::default().waiting);
    assert_eq!(
        controller.api().calls(),
        vec![Call::SubmitLink("https://forum.treetree2.school/x".to_string())]
    );

    // A later sync still reflects the submission.
    let again = controller.sync().await.unwrap();
    assert_eq!(
        again.learner_submission_link(),
        Some("https://forum.treetree2.school/x")
    );
}

#[tokio::test]
async fn disallowed_link_is_refused_without_network() {
    let controller = learner();
    let err = controller
        .submit_link("http://evil.example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, ActionError::InvalidLink(_)));
    assert_eq!(err.user_message().as_deref(), Some("Link inválido..."));
    assert!(controller.api().calls().is_empty());
}

#[tokio::test]
async fn empty_link_is_refused_without_network() {
    let controller = learner();
    let err = controller.submit_link("").await.unwrap_err();

    assert!(matches!(err, ActionError::InvalidLink(_)));
    assert!(controller.api().calls().is_empty());
}

#[tokio::test]
async fn server_rejection_keeps_learner_unsubmitted() {
    let controller = learner();
    controller
        .api()
        .queue_reply(ActionResponse::error("Apenas uma submissão por aluno."));

    let err = controller
        .submit_link("https://discord.com/channels/1")
        .await
        .unwrap_err();
    assert_eq!(err, ActionError::Rejected("Apenas uma submissão por aluno.".to_string()));
    assert_eq!(err.user_message().as_deref(), Some("Apenas uma submissão por aluno."));

    let snapshot = controller.sync().await.unwrap();
    assert!(snapshot.learner_submission_link().is_none());
}

#[tokio::test]
async fn staff_cannot_submit_links() {
    let controller = staff();
    let err = controller
        .submit_link("https://discord.com/channels/1")
        .await
        .unwrap_err();

    assert_eq!(err, ActionError::WrongRole(Role::Staff));
    assert!(err.user_message().is_none());
    assert!(controller.api().calls().is_empty());
}

// =========================================================================
// validate_submission
// =========================================================================

#[tokio::test]
async fn validation_marks_record_and_removes_action() {
    let controller = staff();
    let snapshot = controller
        .validate_submission(Some("42"))
        .await
        .unwrap()
        .expect("a snapshot after validation");

    let RoleView::Staff(view) = &snapshot.view else {
        panic!("expected staff view");
    };
    let validated = view.record("42").unwrap();
    assert!(validated.validated);
    assert!(!validated.is_actionable());
    assert_eq!(
        controller.api().calls(),
        vec![Call::Validate("42".to_string()), Call::Load(String::new())]
    );
}

#[tokio::test]
async fn missing_user_id_is_a_silent_no_op() {
    let controller = staff();

    assert_eq!(controller.validate_submission(None).await, Ok(None));
    assert_eq!(controller.validate_submission(Some("")).await, Ok(None));
    assert!(controller.api().calls().is_empty());
}

#[tokio::test]
async fn rejected_validation_leaves_list_unchanged() {
    let controller = staff();
    let before = controller.sync().await.unwrap();
    controller
        .api()
        .queue_reply(ActionResponse::error("already validated"));

    let err = controller
        .validate_submission(Some("42"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some("already validated"));

    let after = controller.sync().await.unwrap();
    assert_eq!(before.submissions(), after.submissions());
    let calls = controller.api().calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1], Call::Validate("42".to_string()));
}

#[tokio::test]
async fn learner_cannot_validate() {
    let controller = learner();
    let err = controller
        .validate_submission(Some("42"))
        .await
        .unwrap_err();

    assert_eq!(err, ActionError::WrongRole(Role::Learner));
    assert!(controller.api().calls().is_empty());
}

// =========================================================================
// change_cohort
// =========================================================================

#[tokio::test]
async fn cohort_change_is_optimistic_and_sent_on_next_sync() {
    let controller = staff();
    let snapshot = controller.change_cohort("T1").await.unwrap();

    assert_eq!(controller.cohort_filter().as_deref(), Some("T1"));
    assert_eq!(snapshot.current_cohort(), Some("T1"));
    assert_eq!(
        controller.api().calls(),
        vec![
            Call::ChangeCohort("T1".to_string()),
            Call::Load("T1".to_string()),
        ]
    );
}

#[tokio::test]
async fn failed_cohort_post_still_syncs() {
    let api = MockApi {
        fail_change_cohort: true,
        ..MockApi::with_payload(staff_payload())
    };
    let controller = ForumTaskController::new(api, context(Role::Staff, true));

    let snapshot = controller.change_cohort("T2").await.unwrap();
    assert_eq!(snapshot.current_cohort(), Some("T2"));
    assert_eq!(
        controller.api().calls().last(),
        Some(&Call::Load("T2".to_string()))
    );
}

#[tokio::test]
async fn empty_cohort_clears_the_filter() {
    let controller = staff();
    controller.change_cohort("T1").await.unwrap();
    controller.change_cohort("").await.unwrap();

    assert_eq!(controller.cohort_filter(), None);
    assert_eq!(
        controller.api().calls().last(),
        Some(&Call::Load(String::new()))
    );
}

#[tokio::test]
async fn cleared_filter_is_sent_even_when_post_fails() {
    let mut ctx = context(Role::Staff, true);
    ctx.cohort = Some("T1".to_string());
    let api = MockApi {
        fail_change_cohort: true,
        ..MockApi::with_payload(staff_payload())
    };
    let controller = ForumTaskController::new(api, ctx);

    let snapshot = controller.change_cohort("").await.unwrap();
    assert_eq!(snapshot.current_cohort(), None);
    assert_eq!(
        controller.api().calls(),
        vec![
            Call::ChangeCohort(String::new()),
            Call::Load(String::new()),
        ]
    );
}

#[tokio::test]
async fn cohort_change_needs_a_cohorted_course() {
    let controller =
        ForumTaskController::new(MockApi::default(), context(Role::Staff, false));

    assert_eq!(
        controller.change_cohort("T1").await.unwrap_err(),
        ActionError::NotCohorted
    );
    assert_eq!(controller.cohort_filter(), None);
    assert!(controller.api().calls().is_empty());
}

#[tokio::test]
async fn cohorting_follows_the_latest_payload() {
    let controller = ForumTaskController::new(
        MockApi::with_payload(staff_payload()),
        context(Role::Staff, false),
    );
    controller.sync().await.unwrap();

    let snapshot = controller.change_cohort("T2").await.unwrap();
    assert_eq!(snapshot.current_cohort(), Some("T2"));

    let uncohorted = StaffPayload {
        is_course_cohorted: false,
        ..staff_payload()
    };
    *controller.api().payload.borrow_mut() = uncohorted;
    controller.sync().await.unwrap();
    assert_eq!(
        controller.change_cohort("T1").await.unwrap_err(),
        ActionError::NotCohorted
    );
}

// =========================================================================
// transport failures
// =========================================================================

#[tokio::test]
async fn failed_staff_sync_reports_the_transport_error() {
    let api = MockApi {
        fail_load: true,
        ..MockApi::with_payload(staff_payload())
    };
    let controller = ForumTaskController::new(api, context(Role::Staff, true));

    assert_eq!(controller.sync().await, Err(ApiError::Status(502)));
}

#[tokio::test]
async fn failed_submit_keeps_the_form() {
    let api = MockApi {
        fail_submit: true,
        ..MockApi::default()
    };
    let controller = ForumTaskController::new(api, context(Role::Learner, false));

    let err = controller
        .submit_link("https://forum.treetree2.school/t/1")
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Api(ApiError::Transport(_))));
    assert!(err.user_message().is_none());

    let snapshot = controller.sync().await.unwrap();
    let RoleView::Learner(view) = &snapshot.view else {
        panic!("expected learner view");
    };
    assert_eq!(view.submission, LearnerSubmission::Unsubmitted);
    assert!(view.submission.shows_form());
}

#[tokio::test]
async fn failed_validate_does_not_resync() {
    let api = MockApi {
        fail_validate: true,
        ..MockApi::with_payload(staff_payload())
    };
    let controller = ForumTaskController::new(api, context(Role::Staff, true));

    let err = controller
        .validate_submission(Some("42"))
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Api(ApiError::Transport(_))));
    assert!(err.user_message().is_none());
    assert_eq!(controller.api().calls(), vec![Call::Validate("42".to_string())]);
}
