//! Transport seam between the content store and the HTTP client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Result;
use crate::kind::{Lookup, ResourceKind};
use crate::payload::{Mutation, Payload};

/// Read/write surface the content store is built against.
///
/// [`ApiClient`] is the production implementation; tests substitute a
/// scripted backend to exercise caching, de-duplication, and invalidation
/// without a server.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Fetch a collection with the given query parameters.
    async fn list(
        &self,
        kind: ResourceKind,
        query: &BTreeMap<String, String>,
    ) -> Result<Vec<Value>>;

    /// Fetch a single resource by slug or id.
    async fn detail(&self, kind: ResourceKind, lookup: &Lookup) -> Result<Value>;

    /// Fetch a singleton resource.
    async fn singleton(&self, kind: ResourceKind) -> Result<Value>;

    /// Fetch the featured sub-collection.
    async fn featured(&self, kind: ResourceKind) -> Result<Vec<Value>>;

    /// Issue a mutation: exactly one request, never retried.
    async fn submit(
        &self,
        kind: ResourceKind,
        mutation: &Mutation,
        payload: &Payload,
    ) -> Result<Option<Value>>;
}

#[async_trait]
impl Backend for ApiClient {
    async fn list(
        &self,
        kind: ResourceKind,
        query: &BTreeMap<String, String>,
    ) -> Result<Vec<Value>> {
        Self::list(self, kind, query).await
    }

    async fn detail(&self, kind: ResourceKind, lookup: &Lookup) -> Result<Value> {
        Self::detail(self, kind, lookup).await
    }

    async fn singleton(&self, kind: ResourceKind) -> Result<Value> {
        Self::singleton(self, kind).await
    }

    async fn featured(&self, kind: ResourceKind) -> Result<Vec<Value>> {
        Self::featured(self, kind).await
    }

    async fn submit(
        &self,
        kind: ResourceKind,
        mutation: &Mutation,
        payload: &Payload,
    ) -> Result<Option<Value>> {
        Self::submit(self, kind, mutation, payload).await
    }
}
