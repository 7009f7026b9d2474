//! HTTP client for the content backend.

use std::collections::BTreeMap;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, FieldErrors, Result};
use crate::kind::{Lookup, ResourceKind};
use crate::payload::{Mutation, Payload};
use crate::retry::RetryPolicy;

/// List envelope returned by collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Total number of results across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// Results on this page.
    pub results: Vec<T>,
}

/// Typed client for the backend REST surface.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client for the given API base URL (e.g.
    /// `http://localhost:8000/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: &str, retry: RetryPolicy) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::Unknown(format!("invalid base URL {base_url:?}: {e}")))?;
        // Trailing slash so Url::join appends instead of replacing.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            base,
            http: reqwest::Client::new(),
            retry,
        })
    }

    /// The retry policy applied to reads.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch a collection, unwrapping the list envelope.
    ///
    /// Query parameters are flat string pairs; an empty map means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] once retries are exhausted, or the
    /// mapped error for a non-success response.
    pub async fn list(
        &self,
        kind: ResourceKind,
        query: &BTreeMap<String, String>,
    ) -> Result<Vec<Value>> {
        let url = self.join(&format!("{}/", kind.path()))?;
        let body = self.get_with_retry(url, Some(query)).await?;
        let page: Page<Value> = serde_json::from_value(body)
            .map_err(|e| ApiError::Unknown(format!("malformed list envelope: {e}")))?;
        Ok(page.results)
    }

    /// Fetch a single resource by slug or id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the backend reports 404.
    pub async fn detail(&self, kind: ResourceKind, lookup: &Lookup) -> Result<Value> {
        let url = self.join(&format!("{}/{lookup}/", kind.path()))?;
        self.get_with_retry(url, None).await
    }

    /// Fetch a singleton resource (`company/`, `settings/`).
    ///
    /// # Errors
    ///
    /// Returns the mapped error for a non-success response.
    pub async fn singleton(&self, kind: ResourceKind) -> Result<Value> {
        let url = self.join(&format!("{}/", kind.path()))?;
        self.get_with_retry(url, None).await
    }

    /// Fetch the featured sub-collection (bare array, no envelope).
    ///
    /// # Errors
    ///
    /// Returns the mapped error for a non-success response.
    pub async fn featured(&self, kind: ResourceKind) -> Result<Vec<Value>> {
        let url = self.join(&format!("{}/featured/", kind.path()))?;
        let body = self.get_with_retry(url, None).await?;
        serde_json::from_value(body)
            .map_err(|e| ApiError::Unknown(format!("malformed featured list: {e}")))
    }

    /// Issue a mutation. Exactly one request per call; mutations are never
    /// retried.
    ///
    /// The payload is sent as JSON when all fields are text and as
    /// multipart form data when a binary field is present. `Delete` and
    /// empty response bodies yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for field-level 4xx rejections,
    /// [`ApiError::NotFound`] for missing targets, [`ApiError::Network`]
    /// for transport failures.
    pub async fn submit(
        &self,
        kind: ResourceKind,
        mutation: &Mutation,
        payload: &Payload,
    ) -> Result<Option<Value>> {
        let (method, url) = self.mutation_target(kind, mutation)?;
        debug!("submit {method} {url}");

        let request = self.http.request(method, url);
        let request = if payload.is_multipart() {
            request.multipart(payload.to_form())
        } else {
            request.json(&payload.to_json())
        };

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if status.is_client_error() {
            return Err(client_error(response).await);
        }
        if !status.is_success() {
            return Err(ApiError::Unknown(format!("unexpected status {status}")));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Unknown(format!("malformed response body: {e}")))?;
        Ok(Some(value))
    }

    /// Resolve a media path to a full URL.
    ///
    /// Absolute URLs pass through unchanged; relative paths are prefixed
    /// with the backend root (the base URL minus its `/api` suffix). Empty
    /// input yields an empty string.
    #[must_use]
    pub fn media_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let root = self
            .base
            .as_str()
            .trim_end_matches('/')
            .trim_end_matches("/api");
        if path.starts_with('/') {
            format!("{root}{path}")
        } else {
            format!("{root}/{path}")
        }
    }

    fn join(&self, segment: &str) -> Result<Url> {
        self.base
            .join(segment)
            .map_err(|e| ApiError::Unknown(format!("invalid URL segment {segment:?}: {e}")))
    }

    fn mutation_target(&self, kind: ResourceKind, mutation: &Mutation) -> Result<(Method, Url)> {
        let target = match mutation {
            Mutation::Create => (Method::POST, self.join(&format!("{}/", kind.path()))?),
            Mutation::Update(id) => (
                Method::PATCH,
                self.join(&format!("{}/{id}/", kind.path()))?,
            ),
            Mutation::Delete(id) => (
                Method::DELETE,
                self.join(&format!("{}/{id}/", kind.path()))?,
            ),
            Mutation::Apply => (Method::POST, self.join("apply/")?),
            Mutation::Inquire => (Method::POST, self.join("contact/")?),
        };
        Ok(target)
    }

    /// GET a URL, retrying transport failures per the configured policy.
    async fn get_with_retry(
        &self,
        url: Url,
        query: Option<&BTreeMap<String, String>>,
    ) -> Result<Value> {
        let mut attempt = 0;
        loop {
            match self.get_once(url.clone(), query).await {
                Ok(value) => return Ok(value),
                Err(ApiError::Network(reason)) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    warn!("read of {url} failed ({reason}), retry {attempt}");
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(
        &self,
        url: Url,
        query: Option<&BTreeMap<String, String>>,
    ) -> Result<Value> {
        debug!("GET {url}");
        let mut request = self.http.get(url);
        if let Some(query) = query
            && !query.is_empty()
        {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if status.is_client_error() {
            return Err(client_error(response).await);
        }
        if !status.is_success() {
            return Err(ApiError::Unknown(format!("unexpected status {status}")));
        }
        response.json().await.map_err(Into::into)
    }
}

/// Map a 4xx response body to the error taxonomy.
///
/// A JSON object whose values are arrays of strings is a field-level
/// validation rejection; a `detail` message or anything else is `Unknown`.
async fn client_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(_) => return ApiError::Unknown(format!("unexpected status {status}")),
    };

    if let Some(object) = body.as_object() {
        let mut fields = FieldErrors::new();
        for (field, messages) in object {
            if let Some(list) = messages.as_array() {
                let messages: Vec<String> = list
                    .iter()
                    .filter_map(|m| m.as_str().map(ToString::to_string))
                    .collect();
                if !messages.is_empty() {
                    fields.insert(field.clone(), messages);
                }
            }
        }
        if !fields.is_empty() {
            return ApiError::Validation(fields);
        }
        if let Some(detail) = object.get("detail").and_then(Value::as_str) {
            return ApiError::Unknown(format!("{status}: {detail}"));
        }
    }
    ApiError::Unknown(format!("unexpected status {status}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/api", RetryPolicy::default()).unwrap()
    }

    #[test]
    fn test_media_url_relative() {
        let client = client();
        assert_eq!(
            client.media_url("/media/projects/unit-one.jpg"),
            "http://localhost:8000/media/projects/unit-one.jpg"
        );
        assert_eq!(
            client.media_url("media/plain.jpg"),
            "http://localhost:8000/media/plain.jpg"
        );
    }

    #[test]
    fn test_media_url_absolute_passthrough() {
        let client = client();
        assert_eq!(
            client.media_url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(client.media_url(""), "");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url", RetryPolicy::none()).is_err());
    }

    #[test]
    fn test_mutation_targets() {
        let client = client();
        let (method, url) = client
            .mutation_target(ResourceKind::Notice, &Mutation::Update(4))
            .unwrap();
        assert_eq!(method, Method::PATCH);
        assert_eq!(url.as_str(), "http://localhost:8000/api/notices/4/");

        let (method, url) = client
            .mutation_target(ResourceKind::Career, &Mutation::Apply)
            .unwrap();
        assert_eq!(method, Method::POST);
        assert_eq!(url.as_str(), "http://localhost:8000/api/apply/");
    }

    #[test]
    fn test_page_envelope_decodes() {
        let json = r#"{
            "count": 2,
            "next": null,
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }"#;
        let page: Page<Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results.len(), 2);
        assert!(page.next.is_none());
    }
}
