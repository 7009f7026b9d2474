//! Cache keys and store update events.

use std::collections::BTreeMap;

use voltsite_api::{Lookup, ResourceKind};

/// Identifies one cached read.
///
/// List keys include their query parameters (a `BTreeMap` so parameter
/// order never produces distinct keys); detail, singleton, and featured
/// reads are cached independently of lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A collection read.
    List {
        /// Resource kind.
        kind: ResourceKind,
        /// Flat query parameters; empty means no filter.
        query: BTreeMap<String, String>,
    },
    /// A detail read by slug or id.
    Detail {
        /// Resource kind.
        kind: ResourceKind,
        /// Detail lookup key.
        lookup: Lookup,
    },
    /// A singleton read.
    Singleton {
        /// Resource kind.
        kind: ResourceKind,
    },
    /// A featured sub-collection read.
    Featured {
        /// Resource kind.
        kind: ResourceKind,
    },
}

impl CacheKey {
    /// The resource kind this key belongs to; invalidation evicts by kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::List { kind, .. }
            | Self::Detail { kind, .. }
            | Self::Singleton { kind }
            | Self::Featured { kind } => *kind,
        }
    }
}

/// Events published by the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUpdate {
    /// A background revalidation produced a value different from the one
    /// previously cached under this key.
    Refreshed(CacheKey),
    /// A successful mutation evicted every cache entry of this kind.
    Invalidated(ResourceKind),
}
