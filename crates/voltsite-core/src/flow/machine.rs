//! The guarded multi-step submission state machine.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;
use voltsite_api::{ApiError, Attachment, Backend, Mutation, Payload, ResourceKind};

use super::draft::FormDraft;
use super::rules::Step;
use crate::store::ContentStore;

/// Where a submission flow currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// On the step with this index; the last index is the review step.
    Step(usize),
    /// The single submission request is in flight.
    Submitting,
    /// Terminal success.
    Submitted,
    /// The submission failed; the draft is preserved and the flow is
    /// resubmittable. Behaves like the review step with an error banner.
    Failed(ApiError),
}

impl FlowState {
    /// Whether the flow reached terminal success.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Whether the draft can still be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Step(_) | Self::Failed(_))
    }
}

/// Errors from a submit attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// `submit()` was called from a state other than review or failed.
    #[error("submission is only allowed from the review step")]
    NotAtReview,
    /// The draft has validation errors; they are recorded on the draft.
    #[error("draft has validation errors")]
    Invalid,
    /// The backend rejected or the transport failed; the flow moved to
    /// [`FlowState::Failed`] with the draft intact.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives a user through an ordered sequence of validated steps toward a
/// single submission.
///
/// Forward progress requires the active step to validate; the final step
/// is review, whose validation is "all prior steps valid". A submit issues
/// exactly one mutation; failed submissions keep the draft and may be
/// retried by the user, never automatically.
#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    kind: ResourceKind,
    mutation: Mutation,
    fixed: Vec<(String, String)>,
    steps: Vec<Step>,
    state: FlowState,
    draft: FormDraft,
}

impl SubmissionFlow {
    /// Create a flow. The last step is treated as the review step and
    /// `steps` must not be empty.
    #[must_use]
    pub fn new(kind: ResourceKind, mutation: Mutation, steps: Vec<Step>) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            kind,
            mutation,
            fixed: Vec::new(),
            steps,
            state: FlowState::Step(0),
            draft: FormDraft::new(),
        }
    }

    /// Add a fixed field included in every submission payload (e.g. the
    /// target job-listing id).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fixed.push((name.into(), value.into()));
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Index of the active step; `Submitting`/`Failed` report the review
    /// step, `Submitted` reports none.
    #[must_use]
    pub fn step_index(&self) -> Option<usize> {
        match self.state {
            FlowState::Step(index) => Some(index),
            FlowState::Submitting | FlowState::Failed(_) => Some(self.review_index()),
            FlowState::Submitted => None,
        }
    }

    /// Name of the active step, if any.
    #[must_use]
    pub fn step_name(&self) -> Option<&'static str> {
        self.step_index().map(|i| self.steps[i].name())
    }

    /// Whether the flow sits on the review step.
    #[must_use]
    pub fn at_review(&self) -> bool {
        matches!(self.state, FlowState::Step(index) if index == self.review_index())
    }

    /// The draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Set a text field. Ignored once the flow is submitting or submitted.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        if self.state.is_editable() {
            self.draft.set(field, value);
        }
    }

    /// Attach a file. Ignored once the flow is submitting or submitted.
    pub fn attach_file(&mut self, field: impl Into<String>, attachment: Attachment) {
        if self.state.is_editable() {
            self.draft.attach(field, attachment);
        }
    }

    /// Validate the active step and move forward on success.
    ///
    /// On validation failure the per-field errors are recorded on the
    /// draft and the step index does not change. Returns whether the flow
    /// moved.
    pub fn advance(&mut self) -> bool {
        let FlowState::Step(index) = self.state else {
            return false;
        };
        if index >= self.review_index() {
            return false;
        }

        let errors = self.steps[index].validate(&self.draft);
        if errors.is_empty() {
            self.state = FlowState::Step(index + 1);
            debug!("advanced to step {:?}", self.step_name());
            true
        } else {
            self.draft.set_errors(errors);
            false
        }
    }

    /// Move back one step. Entered values survive. Allowed from any
    /// non-initial, non-terminal state; from `Failed` this dismisses the
    /// error and returns to the last content step.
    pub fn retreat(&mut self) -> bool {
        match self.state {
            FlowState::Step(index) if index > 0 => {
                self.state = FlowState::Step(index - 1);
                true
            }
            FlowState::Failed(_) => {
                self.state = FlowState::Step(self.review_index().saturating_sub(1));
                true
            }
            _ => false,
        }
    }

    /// Dismiss a submission error, returning to the review step.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FlowState::Failed(_)) {
            self.state = FlowState::Step(self.review_index());
        }
    }

    /// Submit the draft: exactly one mutation per call, never retried
    /// automatically.
    ///
    /// Allowed only from the review step or from `Failed` (user-initiated
    /// retry). Review validation re-checks every step; a draft with
    /// validation errors never submits.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotAtReview`] when called from any other state,
    /// [`FlowError::Invalid`] when validation fails (errors are on the
    /// draft), [`FlowError::Api`] when the backend rejects — the flow
    /// moves to `Failed` and the draft is preserved.
    pub async fn submit<B: Backend>(
        &mut self,
        store: &ContentStore<B>,
    ) -> Result<(), FlowError> {
        if !self.at_review() && !matches!(self.state, FlowState::Failed(_)) {
            return Err(FlowError::NotAtReview);
        }

        let errors = self.validate_all();
        if !errors.is_empty() {
            self.state = FlowState::Step(self.review_index());
            self.draft.set_errors(errors);
            return Err(FlowError::Invalid);
        }

        self.state = FlowState::Submitting;
        let payload: Payload = self.draft.to_payload(&self.fixed);
        match store.mutate(self.kind, self.mutation.clone(), payload).await {
            Ok(_) => {
                debug!("submission to {} succeeded", self.kind);
                self.state = FlowState::Submitted;
                Ok(())
            }
            Err(e) => {
                self.state = FlowState::Failed(e.clone());
                Err(e.into())
            }
        }
    }

    /// Return to the first step and clear all values, errors, and files.
    /// Total: every field is restored to its initial empty value.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.state = FlowState::Step(0);
    }

    /// Validate every step, first failure per field wins.
    fn validate_all(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for step in &self.steps {
            for (field, message) in step.validate(&self.draft) {
                errors.entry(field).or_insert(message);
            }
        }
        errors
    }

    fn review_index(&self) -> usize {
        self.steps.len() - 1
    }
}
