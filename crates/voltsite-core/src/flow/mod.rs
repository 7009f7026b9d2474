//! Guarded multi-step submission flows.
//!
//! One reusable step machine, parameterized by a step list and per-step
//! validation rules, drives every form on the site: the public job
//! application and contact form as well as the admin content editors.

mod draft;
mod machine;
pub mod presets;
mod rules;

pub use draft::FormDraft;
pub use machine::{FlowError, FlowState, SubmissionFlow};
pub use rules::{Check, Rule, Step};
