//! In-progress form state.

use std::collections::BTreeMap;

use voltsite_api::{Attachment, Payload};

/// Mutable state of an in-progress submission.
///
/// Holds per-field text values, attached files, and the per-field error
/// map from the most recent validation. Created when a flow opens,
/// destroyed by [`FormDraft::clear`] when the flow is reset.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
    files: BTreeMap<String, Attachment>,
    errors: BTreeMap<String, String>,
}

impl FormDraft {
    /// Create an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            files: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Set a text field, clearing any error recorded for it.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        self.errors.remove(&field);
        self.values.insert(field, value.into());
    }

    /// Attach a file to a field, clearing any error recorded for it.
    pub fn attach(&mut self, field: impl Into<String>, attachment: Attachment) {
        let field = field.into();
        self.errors.remove(&field);
        self.files.insert(field, attachment);
    }

    /// Current value of a text field; empty if never set.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Attached file for a field, if any.
    #[must_use]
    pub fn file(&self, field: &str) -> Option<&Attachment> {
        self.files.get(field)
    }

    /// Error recorded for a field, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// The full per-field error map.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Replace the per-field error map.
    pub fn set_errors(&mut self, errors: BTreeMap<String, String>) {
        self.errors = errors;
    }

    /// Whether the draft holds no values, files, or errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.files.is_empty() && self.errors.is_empty()
    }

    /// Clear all values, files, and errors.
    pub fn clear(&mut self) {
        self.values.clear();
        self.files.clear();
        self.errors.clear();
    }

    /// Package the draft into a write payload. Fixed fields (e.g. the
    /// target job-listing id) come first, then text values, then files.
    #[must_use]
    pub fn to_payload(&self, fixed: &[(String, String)]) -> Payload {
        let mut payload = Payload::new();
        for (name, value) in fixed {
            payload.push_text(name.clone(), value.clone());
        }
        for (name, value) in &self.values {
            payload.push_text(name.clone(), value.clone());
        }
        for (name, attachment) in &self.files {
            payload.push_file(name.clone(), attachment.clone());
        }
        payload
    }
}
