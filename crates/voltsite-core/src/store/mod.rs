//! Read-through data access: cache, request de-duplication,
//! stale-while-revalidate, and invalidation on write.

mod content;
mod key;

pub use content::{ContentStore, DEFAULT_TTL};
pub use key::{CacheKey, StoreUpdate};
