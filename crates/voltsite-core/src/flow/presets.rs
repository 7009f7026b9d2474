//! Ready-made flows for the site's concrete forms.

use voltsite_api::{Mutation, ResourceKind};

use super::machine::SubmissionFlow;
use super::rules::{Check, Step};

/// Accepted résumé file extensions.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Maximum résumé size in bytes.
pub const RESUME_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Minimum cover-letter length in characters.
pub const COVER_LETTER_MIN_CHARS: usize = 100;

/// Job-application flow for one job listing.
///
/// Steps: `details` (name, email, phone; optional LinkedIn URL),
/// `documents` (résumé file and cover letter), `review`. Submits a single
/// multipart application carrying the `career` id.
#[must_use]
pub fn job_application(career_id: u64) -> SubmissionFlow {
    SubmissionFlow::new(
        ResourceKind::Career,
        Mutation::Apply,
        vec![
            Step::new("details")
                .rule("full_name", Check::Required)
                .rule("email", Check::Required)
                .rule("email", Check::Email)
                .rule("phone", Check::Required),
            Step::new("documents")
                .rule(
                    "resume",
                    Check::File {
                        extensions: RESUME_EXTENSIONS,
                        max_bytes: RESUME_MAX_BYTES,
                    },
                )
                .rule("cover_letter", Check::Required)
                .rule("cover_letter", Check::MinLen(COVER_LETTER_MIN_CHARS)),
            Step::new("review"),
        ],
    )
    .with_field("career", career_id.to_string())
}

/// Contact-inquiry flow. One content step, then review; submits JSON.
#[must_use]
pub fn contact_inquiry() -> SubmissionFlow {
    SubmissionFlow::new(
        ResourceKind::Company,
        Mutation::Inquire,
        vec![
            Step::new("details")
                .rule("full_name", Check::Required)
                .rule("email", Check::Required)
                .rule("email", Check::Email)
                .rule("category", Check::Required)
                .rule("message", Check::Required),
            Step::new("review"),
        ],
    )
}

/// Admin editor flow for notices. Creates when `existing` is `None`,
/// updates otherwise; either way the store invalidates notice caches on
/// success.
#[must_use]
pub fn notice_editor(existing: Option<u64>) -> SubmissionFlow {
    let mutation = existing.map_or(Mutation::Create, Mutation::Update);
    SubmissionFlow::new(
        ResourceKind::Notice,
        mutation,
        vec![
            Step::new("content")
                .rule("title", Check::Required)
                .rule("category", Check::Required)
                .rule("excerpt", Check::Required)
                .rule("content", Check::Required),
            Step::new("review"),
        ],
    )
}

/// Admin editor flow for tenders. Deadline must coerce to a date.
#[must_use]
pub fn tender_editor(existing: Option<u64>) -> SubmissionFlow {
    let mutation = existing.map_or(Mutation::Create, Mutation::Update);
    SubmissionFlow::new(
        ResourceKind::Tender,
        mutation,
        vec![
            Step::new("details")
                .rule("tender_id", Check::Required)
                .rule("title", Check::Required)
                .rule("category", Check::Required)
                .rule("description", Check::Required)
                .rule("publication_date", Check::Required)
                .rule("publication_date", Check::Date)
                .rule("deadline", Check::Required)
                .rule("deadline", Check::Date),
            Step::new("review"),
        ],
    )
}
