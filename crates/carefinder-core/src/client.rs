// crates/carefinder-core/src/client.rs

//! # Fetch Client
//!
//! One GET per (city, limit) pair against the facilities endpoint. No
//! retries: the caller re-invokes on the next user action.

use crate::config::{ClientConfig, CLIENT_DEFAULT_LIMIT};
use crate::error::{CareError, LoadError, Result};
use crate::model::FacilityRecord;
use crate::wire::{error_detail, parse_facilities};
use reqwest::Url;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, trace};

/// Anything that can produce the facility list for a city.
///
/// The HTTP implementation is [`HttpFetchClient`]; tests and demos plug in
/// their own.
pub trait FetchClient: Send + Sync {
    fn fetch_facilities(
        &self,
        city: &str,
        limit: u32,
    ) -> impl Future<Output = std::result::Result<Vec<FacilityRecord>, LoadError>> + Send;

    /// Fetch with [`CLIENT_DEFAULT_LIMIT`], for callers with no limit preference.
    fn fetch_facilities_default(
        &self,
        city: &str,
    ) -> impl Future<Output = std::result::Result<Vec<FacilityRecord>, LoadError>> + Send {
        self.fetch_facilities(city, CLIENT_DEFAULT_LIMIT)
    }
}

impl<C: FetchClient> FetchClient for Arc<C> {
    fn fetch_facilities(
        &self,
        city: &str,
        limit: u32,
    ) -> impl Future<Output = std::result::Result<Vec<FacilityRecord>, LoadError>> + Send {
        (**self).fetch_facilities(city, limit)
    }
}

/// [`FetchClient`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpFetchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CareError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Client for the process-wide [`ClientConfig::global`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::global()?.clone())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/api/facilities?city=..&limit=..`; `limit` is left out when zero.
    pub fn request_url(&self, city: &str, limit: u32) -> std::result::Result<Url, LoadError> {
        let mut url = Url::parse(&self.config.facilities_url())
            .map_err(|e| LoadError::InvalidRequest(format!("bad facilities URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("city", city);
            if limit > 0 {
                query.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> LoadError {
        if err.is_timeout() {
            LoadError::Timeout(self.config.timeout)
        } else {
            LoadError::Transport(err.to_string())
        }
    }
}

impl FetchClient for HttpFetchClient {
    async fn fetch_facilities(
        &self,
        city: &str,
        limit: u32,
    ) -> std::result::Result<Vec<FacilityRecord>, LoadError> {
        if city.trim().is_empty() {
            return Err(LoadError::InvalidRequest("city must not be empty".into()));
        }
        let url = self.request_url(city, limit)?;
        debug!(%url, "requesting facilities");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        trace!(status = status.as_u16(), bytes = body.len(), "facilities response");

        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(parse_facilities(&body))
    }
}
