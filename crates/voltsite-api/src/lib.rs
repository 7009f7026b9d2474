//! # voltsite-api
//!
//! Typed REST transport for the voltsite content backend.
//!
//! This crate provides:
//! - An HTTP client over the backend's JSON/multipart surface
//! - Paginated list-envelope decoding
//! - An error taxonomy mapped from response statuses
//! - An explicit retry policy for reads (mutations are never retried)
//! - The [`Backend`] trait the content store is built against

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod backend;
mod client;
mod error;
mod kind;
mod payload;
mod retry;

pub use backend::Backend;
pub use client::{ApiClient, Page};
pub use error::{ApiError, FieldErrors, Result};
pub use kind::{Lookup, ResourceKind};
pub use payload::{Attachment, Mutation, Payload};
pub use retry::RetryPolicy;
