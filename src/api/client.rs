//! The HTTP client for the temperature service.
//!
//! One [`ApiClient`] wraps a shared `reqwest::Client` and normalizes every
//! failure mode of a request (transport, non-success status, undecodable
//! body) into [`ApiError`]. Raw transport or parse errors never escape.

use crate::api::error::{ApiError, ErrorDetail, RequestPurpose};
use crate::error::TrendsError;
use crate::types::responses::{AnnualData, DataRange, MonthlyData, StationList, Summary};
use bon::bon;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Where the service is expected to listen when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Per-request timeout applied when none is configured. There is no retry;
/// a request that misses the deadline fails immediately.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The shared parameter set of every selection-scoped request: the comma-
/// joined selection (insertion order, not sorted) plus the inclusive year
/// window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataParams {
    pub stations: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl DataParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("stations", self.stations.clone()),
            ("start_year", self.start_year.to_string()),
            ("end_year", self.end_year.to_string()),
        ]
    }
}

/// A configured connection to the temperature service.
///
/// Cheap to clone; clones share the underlying connection pool, which makes
/// it easy to hand a copy to a spawned task executing a load.
///
/// # Examples
///
/// ```no_run
/// # use temptrends::{ApiClient, TrendsError};
/// # async fn run() -> Result<(), TrendsError> {
/// let client = ApiClient::builder()
///     .base_url("http://data.example.org/api".to_string())
///     .build()?;
/// let range = client.data_range().await?;
/// println!("dataset covers {:?}..{:?}", range.min_year, range.max_year);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

#[bon]
impl ApiClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. Root of the service API, without a
    ///   trailing slash. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request deadline. Defaults to
    ///   [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::HttpClient`] when the underlying TLS/client
    /// setup fails.
    #[builder]
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self, TrendsError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(TrendsError::HttpClient)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the dataset's year coverage.
    pub async fn data_range(&self) -> Result<DataRange, ApiError> {
        self.get_json("/data/range", &[], RequestPurpose::DataRange)
            .await
    }

    /// Fetches the station inventory in discovery order.
    pub async fn stations(&self) -> Result<StationList, ApiError> {
        self.get_json("/stations", &[], RequestPurpose::Stations)
            .await
    }

    /// Fetches aggregate statistics for a selection and year window.
    pub async fn summary(&self, params: &DataParams) -> Result<Summary, ApiError> {
        self.get_json("/analytics/summary", &params.query(), RequestPurpose::Summary)
            .await
    }

    /// Fetches per-station monthly series for a selection and year window.
    pub async fn monthly(&self, params: &DataParams) -> Result<MonthlyData, ApiError> {
        self.get_json("/data/monthly", &params.query(), RequestPurpose::MonthlyData)
            .await
    }

    /// Fetches per-station annual series, optionally with the ±1σ deviation
    /// band (`include_std`).
    pub async fn annual(
        &self,
        params: &DataParams,
        include_std: bool,
    ) -> Result<AnnualData, ApiError> {
        let mut query = params.query();
        query.push(("include_std", include_std.to_string()));
        self.get_json("/data/annual", &query, RequestPurpose::AnnualData)
            .await
    }

    /// Executes one GET request and normalizes the outcome.
    ///
    /// The body is read exactly once. An empty success body decodes to the
    /// type's `Default` value; a non-empty body that fails to decode is a
    /// malformed response even though the HTTP exchange succeeded.
    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        purpose: RequestPurpose,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} ({purpose})");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                method: Method::GET,
                purpose,
                source,
            })?;

        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                url: final_url.clone(),
                method: Method::GET,
                purpose,
                source,
            })?;

        if !status.is_success() {
            warn!("GET {final_url} failed with status {status} ({purpose})");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: final_url,
                method: Method::GET,
                purpose,
                detail: ErrorDetail::from_body(&body, content_type.as_deref()),
                content_type,
            });
        }

        if body.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&body).map_err(|source| {
            warn!("GET {final_url} returned an undecodable body ({purpose})");
            ApiError::MalformedResponse {
                status: status.as_u16(),
                url: final_url,
                method: Method::GET,
                purpose,
                content_type,
                source,
            }
        })
    }
}
