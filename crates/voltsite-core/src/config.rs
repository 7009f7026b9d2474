//! Environment-supplied configuration.

use std::env;
use std::time::Duration;

use voltsite_api::{ApiClient, RetryPolicy};

use crate::error::{Error, Result};
use crate::store::ContentStore;

/// Environment variable naming the API base URL.
pub const API_URL_VAR: &str = "VOLTSITE_API_URL";

/// Environment variable naming the admin shared secret.
pub const ADMIN_PASSWORD_VAR: &str = "VOLTSITE_ADMIN_PASSWORD";

/// Environment variable overriding the cache freshness window, in seconds.
pub const CACHE_TTL_VAR: &str = "VOLTSITE_CACHE_TTL_SECS";

/// Environment variable overriding the read retry count.
pub const READ_RETRIES_VAR: &str = "VOLTSITE_READ_RETRIES";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Deployment-time configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API.
    pub api_base_url: String,
    /// Shared secret for the admin session gate.
    pub admin_secret: String,
    /// Freshness window for cached reads.
    pub cache_ttl: Duration,
    /// Retry policy for reads.
    pub read_retry: RetryPolicy,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// The API URL, cache TTL, and retry count have defaults; the admin
    /// secret is required so deployments cannot fall back to a hard-coded
    /// password.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the admin secret is missing or a
    /// numeric override does not parse.
    pub fn from_env() -> Result<Self> {
        let api_base_url =
            env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let admin_secret = env::var(ADMIN_PASSWORD_VAR)
            .map_err(|_| Error::Config(format!("{ADMIN_PASSWORD_VAR} is not set")))?;
        if admin_secret.is_empty() {
            return Err(Error::Config(format!("{ADMIN_PASSWORD_VAR} is empty")));
        }

        let cache_ttl = match env::var(CACHE_TTL_VAR) {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                Error::Config(format!("{CACHE_TTL_VAR} must be a number of seconds"))
            })?),
            Err(_) => Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        };

        let read_retry = match env::var(READ_RETRIES_VAR) {
            Ok(raw) => {
                let max_retries = raw
                    .parse()
                    .map_err(|_| Error::Config(format!("{READ_RETRIES_VAR} must be a number")))?;
                RetryPolicy::new(max_retries, RetryPolicy::default().backoff)
            }
            Err(_) => RetryPolicy::default(),
        };

        Ok(Self {
            api_base_url,
            admin_secret,
            cache_ttl,
            read_retry,
        })
    }

    /// Build the production content store from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn content_store(&self) -> Result<ContentStore<ApiClient>> {
        let client = ApiClient::new(&self.api_base_url, self.read_retry)?;
        Ok(ContentStore::with_ttl(client, self.cache_ttl))
    }
}
