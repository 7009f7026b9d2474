//! Integration tests for the submission flows.
//!
//! Drives the job-application and contact flows end to end against a
//! backend that records what was submitted.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use voltsite_api::{
    ApiError, Attachment, Backend, Lookup, Mutation, Payload, ResourceKind, Result,
};
use voltsite_core::flow::presets::{self, COVER_LETTER_MIN_CHARS};
use voltsite_core::{ContentStore, FlowError, FlowState};

/// Backend that records every submission and replays scripted outcomes.
#[derive(Default)]
struct CapturingBackend {
    submitted: Mutex<Vec<(ResourceKind, Mutation, Payload)>>,
    outcomes: Mutex<VecDeque<Result<Option<Value>>>>,
}

impl CapturingBackend {
    fn new() -> Self {
        Self::default()
    }

    fn push_outcome(&self, outcome: Result<Option<Value>>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    fn submissions(&self) -> Vec<(ResourceKind, Mutation, Payload)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for CapturingBackend {
    async fn list(&self, _kind: ResourceKind, _query: &BTreeMap<String, String>) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn detail(&self, _kind: ResourceKind, _lookup: &Lookup) -> Result<Value> {
        Err(ApiError::NotFound)
    }

    async fn singleton(&self, _kind: ResourceKind) -> Result<Value> {
        Err(ApiError::NotFound)
    }

    async fn featured(&self, _kind: ResourceKind) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn submit(
        &self,
        kind: ResourceKind,
        mutation: &Mutation,
        payload: &Payload,
    ) -> Result<Option<Value>> {
        self.submitted
            .lock()
            .unwrap()
            .push((kind, mutation.clone(), payload.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

fn resume() -> Attachment {
    Attachment::new("cv.pdf", "application/pdf", vec![0u8; 2 * 1024 * 1024])
}

fn cover_letter() -> String {
    "x".repeat(COVER_LETTER_MIN_CHARS + 20)
}

/// Fill a job-application flow up to the review step.
fn filled_application() -> voltsite_core::SubmissionFlow {
    let mut flow = presets::job_application(7);
    flow.set_field("full_name", "Jane Doe");
    flow.set_field("email", "jane.doe@example.com");
    flow.set_field("phone", "+880-1700-000000");
    assert!(flow.advance());
    flow.attach_file("resume", resume());
    flow.set_field("cover_letter", cover_letter());
    assert!(flow.advance());
    assert!(flow.at_review());
    flow
}

#[tokio::test]
async fn test_job_application_happy_path() {
    let store = ContentStore::new(CapturingBackend::new());
    let mut flow = filled_application();

    flow.submit(&store).await.unwrap();
    assert_eq!(flow.state(), &FlowState::Submitted);

    let submissions = store.backend().submissions();
    assert_eq!(submissions.len(), 1);
    let (kind, mutation, payload) = &submissions[0];
    assert_eq!(*kind, ResourceKind::Career);
    assert_eq!(*mutation, Mutation::Apply);
    assert_eq!(payload.get_text("career"), Some("7"));
    assert_eq!(payload.get_text("full_name"), Some("Jane Doe"));
    assert!(payload.is_multipart());
}

#[tokio::test]
async fn test_submit_requires_the_review_step() {
    let store = ContentStore::new(CapturingBackend::new());
    let mut flow = presets::job_application(7);

    let result = flow.submit(&store).await;
    assert_eq!(result.unwrap_err(), FlowError::NotAtReview);
    assert!(store.backend().submissions().is_empty());
}

#[test]
fn test_invalid_step_blocks_and_repeats() {
    let mut flow = presets::job_application(7);
    flow.set_field("full_name", "Jane Doe");
    flow.set_field("email", "not-an-email");
    flow.set_field("phone", "+880-1700-000000");

    assert!(!flow.advance());
    assert_eq!(
        flow.draft().error("email").unwrap(),
        "Enter a valid email address"
    );

    // Same draft, same outcome; the rejection is idempotent.
    assert!(!flow.advance());
    assert_eq!(flow.step_name(), Some("details"));
    assert_eq!(
        flow.draft().error("email").unwrap(),
        "Enter a valid email address"
    );
}

#[test]
fn test_documents_step_requires_a_resume() {
    let mut flow = presets::job_application(7);
    flow.set_field("full_name", "Jane Doe");
    flow.set_field("email", "jane@example.com");
    flow.set_field("phone", "123456");
    assert!(flow.advance());

    flow.set_field("cover_letter", cover_letter());
    assert!(!flow.advance());
    assert_eq!(flow.draft().error("resume").unwrap(), "A file is required");

    flow.attach_file("resume", resume());
    assert!(flow.advance());
    assert!(flow.at_review());
}

#[test]
fn test_retreat_preserves_entered_values() {
    let mut flow = filled_application();
    assert!(flow.retreat());
    assert_eq!(flow.step_name(), Some("documents"));
    assert_eq!(flow.draft().value("full_name"), "Jane Doe");
    assert!(flow.draft().file("resume").is_some());
}

#[tokio::test]
async fn test_failed_submission_keeps_the_draft_and_can_be_retried() {
    let backend = CapturingBackend::new();
    let mut field_errors = BTreeMap::new();
    field_errors.insert(
        "email".to_string(),
        vec!["A user with this email already applied.".to_string()],
    );
    backend.push_outcome(Err(ApiError::Validation(field_errors)));
    let store = ContentStore::new(backend);

    let mut flow = filled_application();
    let result = flow.submit(&store).await;
    assert!(matches!(result, Err(FlowError::Api(ApiError::Validation(_)))));
    assert!(matches!(*flow.state(), FlowState::Failed(_)));

    // The draft survived; a user-initiated retry is allowed and succeeds.
    assert_eq!(flow.draft().value("full_name"), "Jane Doe");
    flow.set_field("email", "jane.other@example.com");
    flow.submit(&store).await.unwrap();
    assert_eq!(flow.state(), &FlowState::Submitted);
    assert_eq!(store.backend().submissions().len(), 2);
}

#[tokio::test]
async fn test_terminal_flow_ignores_edits() {
    let store = ContentStore::new(CapturingBackend::new());
    let mut flow = filled_application();
    flow.submit(&store).await.unwrap();

    flow.set_field("full_name", "Someone Else");
    assert_eq!(flow.draft().value("full_name"), "Jane Doe");

    // A second submit is rejected without reaching the backend.
    let result = flow.submit(&store).await;
    assert_eq!(result.unwrap_err(), FlowError::NotAtReview);
    assert_eq!(store.backend().submissions().len(), 1);
}

#[test]
fn test_reset_is_total() {
    let mut flow = filled_application();
    flow.reset();

    assert_eq!(flow.state(), &FlowState::Step(0));
    assert_eq!(flow.step_name(), Some("details"));
    assert!(flow.draft().is_empty());
    assert_eq!(flow.draft().value("full_name"), "");
    assert!(flow.draft().file("resume").is_none());
}

#[tokio::test]
async fn test_contact_inquiry_submits_json() {
    let store = ContentStore::new(CapturingBackend::new());
    let mut flow = presets::contact_inquiry();
    flow.set_field("full_name", "Jane Doe");
    flow.set_field("email", "jane@example.com");
    flow.set_field("category", "general");
    flow.set_field("message", "Please send the annual report.");
    assert!(flow.advance());

    flow.submit(&store).await.unwrap();

    let submissions = store.backend().submissions();
    assert_eq!(submissions.len(), 1);
    let (kind, mutation, payload) = &submissions[0];
    assert_eq!(*kind, ResourceKind::Company);
    assert_eq!(*mutation, Mutation::Inquire);
    assert!(!payload.is_multipart());
}

#[tokio::test]
async fn test_notice_editor_creates_or_updates() {
    let store = ContentStore::new(CapturingBackend::new());

    let mut create = presets::notice_editor(None);
    create.set_field("title", "Annual shutdown");
    create.set_field("category", "urgent");
    create.set_field("excerpt", "Planned outage.");
    create.set_field("content", "Full schedule attached.");
    assert!(create.advance());
    create.submit(&store).await.unwrap();

    let mut update = presets::notice_editor(Some(4));
    update.set_field("title", "Annual shutdown (revised)");
    update.set_field("category", "urgent");
    update.set_field("excerpt", "Planned outage.");
    update.set_field("content", "Revised schedule attached.");
    assert!(update.advance());
    update.submit(&store).await.unwrap();

    let submissions = store.backend().submissions();
    assert_eq!(submissions[0].1, Mutation::Create);
    assert_eq!(submissions[1].1, Mutation::Update(4));
}

#[tokio::test]
async fn test_review_validation_catches_fields_cleared_after_advancing() {
    let store = ContentStore::new(CapturingBackend::new());
    let mut flow = filled_application();

    // The email was emptied after its step had already validated; review
    // validation re-checks every step.
    flow.set_field("email", "");
    let result = flow.submit(&store).await;
    assert_eq!(result.unwrap_err(), FlowError::Invalid);
    assert_eq!(
        flow.draft().error("email").unwrap(),
        "This field is required"
    );
    assert!(flow.at_review());
    assert!(store.backend().submissions().is_empty());
}
