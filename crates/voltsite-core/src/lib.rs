//! Domain layer for the Voltsite corporate site.
//!
//! Provides the cached content store (read-through cache with request
//! de-duplication and stale-while-revalidate), the guarded multi-step
//! submission flows, the admin session gate, and the typed content
//! models. Transport lives in `voltsite-api`; everything here is written
//! against the [`voltsite_api::Backend`] trait so it can be driven by a
//! scripted backend in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Environment-variable tests need set_var/remove_var, unsafe since
// edition 2024; everything else is forbidden by the workspace lints.
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod flow;
pub mod resource;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use flow::{FlowError, FlowState, FormDraft, SubmissionFlow};
pub use resource::Content;
pub use session::{MemorySessionStore, SessionGate, SessionStore};
pub use store::{CacheKey, ContentStore, StoreUpdate, DEFAULT_TTL};
