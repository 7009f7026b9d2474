//! Declarative per-step validation rules.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::draft::FormDraft;

/// A validation predicate applied to one field.
///
/// Format checks ([`Check::Email`], [`Check::MinLen`], …) pass on empty
/// values; pair them with [`Check::Required`] when the field is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Field must be non-empty (text after trimming, or an attached file).
    Required,
    /// Value must have the shape `local@domain.tld`.
    Email,
    /// Value must be at least this many characters after trimming.
    MinLen(usize),
    /// Value must parse as a number.
    Numeric,
    /// Value must parse as an ISO 8601 date (`YYYY-MM-DD`).
    Date,
    /// An attached file is required, restricted by extension and size.
    File {
        /// Accepted lowercased extensions, without the dot.
        extensions: &'static [&'static str],
        /// Maximum file size in bytes.
        max_bytes: u64,
    },
}

/// A check bound to a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    field: String,
    check: Check,
}

impl Rule {
    /// Bind a check to a field.
    #[must_use]
    pub fn new(field: impl Into<String>, check: Check) -> Self {
        Self {
            field: field.into(),
            check,
        }
    }

    /// The field this rule applies to.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluate against a draft; `None` means the rule passes.
    #[must_use]
    pub fn message(&self, draft: &FormDraft) -> Option<String> {
        let value = draft.value(&self.field).trim();
        match &self.check {
            Check::Required => {
                if value.is_empty() && draft.file(&self.field).is_none() {
                    Some("This field is required".to_string())
                } else {
                    None
                }
            }
            Check::Email => {
                if !value.is_empty() && !is_valid_email(value) {
                    Some("Enter a valid email address".to_string())
                } else {
                    None
                }
            }
            Check::MinLen(min) => {
                if !value.is_empty() && value.chars().count() < *min {
                    Some(format!("Must be at least {min} characters"))
                } else {
                    None
                }
            }
            Check::Numeric => {
                if !value.is_empty() && value.parse::<f64>().is_err() {
                    Some("Enter a number".to_string())
                } else {
                    None
                }
            }
            Check::Date => {
                if !value.is_empty()
                    && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err()
                {
                    Some("Enter a valid date (YYYY-MM-DD)".to_string())
                } else {
                    None
                }
            }
            Check::File {
                extensions,
                max_bytes,
            } => {
                let Some(attachment) = draft.file(&self.field) else {
                    return Some("A file is required".to_string());
                };
                match attachment.extension() {
                    Some(ext) if extensions.contains(&ext.as_str()) => {}
                    _ => {
                        return Some(format!(
                            "Unsupported file type (accepted: {})",
                            extensions.join(", ")
                        ));
                    }
                }
                if attachment.size() > *max_bytes {
                    return Some(format!(
                        "File is too large (max {} MB)",
                        max_bytes / (1024 * 1024)
                    ));
                }
                None
            }
        }
    }
}

/// One named step of a submission flow and its validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    name: &'static str,
    rules: Vec<Rule>,
}

impl Step {
    /// Create a step with no rules.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Add a rule (builder style).
    #[must_use]
    pub fn rule(mut self, field: impl Into<String>, check: Check) -> Self {
        self.rules.push(Rule::new(field, check));
        self
    }

    /// Step name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Validate a draft against this step's rules.
    ///
    /// Returns a field-keyed error map; the first failing check per field
    /// wins. An empty map means the step is valid.
    #[must_use]
    pub fn validate(&self, draft: &FormDraft) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for rule in &self.rules {
            if errors.contains_key(rule.field()) {
                continue;
            }
            if let Some(message) = rule.message(draft) {
                errors.insert(rule.field().to_string(), message);
            }
        }
        errors
    }
}

/// Basic email validation: exactly one `@`, non-empty local part, and a
/// dotted domain with no empty labels.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    !domain.split('.').any(str::is_empty)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use voltsite_api::Attachment;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.com"));
        assert!(is_valid_email("user@sub.example.com"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_required_accepts_attached_file() {
        let mut draft = FormDraft::new();
        let rule = Rule::new("resume", Check::Required);
        assert!(rule.message(&draft).is_some());

        draft.attach("resume", Attachment::new("cv.pdf", "application/pdf", vec![]));
        assert!(rule.message(&draft).is_none());
    }

    #[test]
    fn test_format_checks_pass_on_empty() {
        let draft = FormDraft::new();
        assert!(Rule::new("email", Check::Email).message(&draft).is_none());
        assert!(Rule::new("deadline", Check::Date).message(&draft).is_none());
        assert!(Rule::new("capacity", Check::Numeric).message(&draft).is_none());
    }

    #[test]
    fn test_date_coercion() {
        let mut draft = FormDraft::new();
        draft.set("deadline", "2026-07-15");
        assert!(Rule::new("deadline", Check::Date).message(&draft).is_none());

        draft.set("deadline", "15/07/2026");
        assert!(Rule::new("deadline", Check::Date).message(&draft).is_some());
    }

    #[test]
    fn test_file_check_rejects_wrong_extension_and_size() {
        let check = Check::File {
            extensions: &["pdf", "doc", "docx"],
            max_bytes: 1024,
        };
        let rule = Rule::new("resume", check);

        let mut draft = FormDraft::new();
        assert_eq!(rule.message(&draft).unwrap(), "A file is required");

        draft.attach("resume", Attachment::new("cv.exe", "application/x-msdownload", vec![]));
        assert!(rule.message(&draft).unwrap().starts_with("Unsupported"));

        draft.attach(
            "resume",
            Attachment::new("cv.pdf", "application/pdf", vec![0u8; 2048]),
        );
        assert!(rule.message(&draft).unwrap().starts_with("File is too large"));

        draft.attach(
            "resume",
            Attachment::new("cv.pdf", "application/pdf", vec![0u8; 512]),
        );
        assert!(rule.message(&draft).is_none());
    }

    #[test]
    fn test_step_first_failure_per_field_wins() {
        let step = Step::new("details")
            .rule("email", Check::Required)
            .rule("email", Check::Email);

        let errors = step.validate(&FormDraft::new());
        assert_eq!(errors.get("email").unwrap(), "This field is required");
    }
}
