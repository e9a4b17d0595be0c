//! HTTP client for the CSFloat listings API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use super::listings::{Listing, ListingsPage, ListingsQuery};
use crate::error::ServiceError;

/// Source of market listings for the price pipeline.
///
/// Implemented by [`CsFloatClient`] in production and by in-memory
/// fakes in tests. One network call per invocation; implementations do
/// not retry.
#[async_trait]
pub trait ListingsSource: Send + Sync {
    /// Fetches listings matching `query`, ordered by ascending price.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Upstream`] on transport failure, a
    /// non-success HTTP status, or an undecodable response body.
    async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Listing>, ServiceError>;
}

/// CSFloat listings API client backed by [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct CsFloatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CsFloatClient {
    /// Creates a client against the given API base URL.
    ///
    /// Logs a warning when no API key is configured — unauthenticated
    /// requests may be rate limited or rejected upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Internal`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        if api_key.is_none() {
            tracing::warn!("CSFLOAT_API_KEY is not set; requests may be rate limited or rejected");
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl ListingsSource for CsFloatClient {
    async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Listing>, ServiceError> {
        let url = format!("{}/listings", self.base_url);
        let mut request = self.http.get(&url).query(&query.to_params());
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("csfloat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!(
                "csfloat returned {status}"
            )));
        }

        let page: ListingsPage = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("csfloat response decode failed: {e}")))?;

        Ok(page.data)
    }
}
