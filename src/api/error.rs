use reqwest::Method;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// What a request was fetching, attached to every [`ApiError`] so failure
/// messages can name the thing that did not load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPurpose {
    DataRange,
    Stations,
    Summary,
    MonthlyData,
    AnnualData,
}

impl RequestPurpose {
    /// The human-readable label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            RequestPurpose::DataRange => "dataset year range",
            RequestPurpose::Stations => "station list",
            RequestPurpose::Summary => "analytics summary",
            RequestPurpose::MonthlyData => "monthly data",
            RequestPurpose::AnnualData => "annual data",
        }
    }

    /// Whether this request carries a station selection, and can therefore
    /// fail with a missing-stations body.
    pub(crate) fn is_selection_scoped(&self) -> bool {
        matches!(
            self,
            RequestPurpose::Summary | RequestPurpose::MonthlyData | RequestPurpose::AnnualData
        )
    }
}

impl fmt::Display for RequestPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The `detail` portion of an error response body.
///
/// The service wraps error information as `{"detail": ...}` where the inner
/// value is either a plain reason string or a structured object (for
/// example `{"missing_stations": [...]}`). Bodies that are not shaped that
/// way are kept raw.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// No body, or an explicit `null` detail.
    Empty,
    /// A plain-text reason, either from a string `detail` field or from a
    /// non-JSON body.
    Text(String),
    /// A structured detail value.
    Structured(Value),
}

impl ErrorDetail {
    /// Classifies a raw error body.
    ///
    /// The body counts as JSON when the `Content-Type` header says so or,
    /// as a fallback, when the trimmed text starts with `{` or `[`. A JSON
    /// object's nested `detail` field takes precedence over the object
    /// itself; unparsable bodies are kept verbatim as text.
    pub(crate) fn from_body(body: &str, content_type: Option<&str>) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return ErrorDetail::Empty;
        }
        let looks_json = content_type.is_some_and(|ct| ct.contains("json"))
            || trimmed.starts_with('{')
            || trimmed.starts_with('[');
        if looks_json {
            if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
                let detail = match parsed {
                    Value::Object(mut fields) => {
                        fields.remove("detail").unwrap_or(Value::Object(fields))
                    }
                    other => other,
                };
                return match detail {
                    Value::Null => ErrorDetail::Empty,
                    Value::String(text) => ErrorDetail::Text(text),
                    other => ErrorDetail::Structured(other),
                };
            }
        }
        ErrorDetail::Text(body.to_string())
    }

    /// The plain-text reason, when there is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ErrorDetail::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Station identifiers reported missing by the service, when the detail
    /// is a structured `{"missing_stations": [...]}` object.
    pub fn missing_stations(&self) -> Option<Vec<String>> {
        let ErrorDetail::Structured(value) = self else {
            return None;
        };
        let list = value.get("missing_stations")?.as_array()?;
        let stations: Vec<String> = list
            .iter()
            .map(|entry| match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect();
        if stations.is_empty() {
            None
        } else {
            Some(stations)
        }
    }
}

/// Normalized failure of one request against the temperature service.
///
/// Every failure mode of a request ends up here; raw `reqwest` or
/// `serde_json` errors never escape the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: DNS, refused connection,
    /// timeout. The status-zero case of the taxonomy.
    #[error("could not reach the server: {method} {url} ({purpose})")]
    Transport {
        url: String,
        method: Method,
        purpose: RequestPurpose,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned status {status} ({purpose})")]
    Status {
        status: u16,
        url: String,
        method: Method,
        purpose: RequestPurpose,
        content_type: Option<String>,
        detail: ErrorDetail,
    },

    /// The HTTP exchange succeeded but the body could not be decoded.
    #[error("{method} {url} returned an undecodable body ({purpose})")]
    MalformedResponse {
        status: u16,
        url: String,
        method: Method,
        purpose: RequestPurpose,
        content_type: Option<String>,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The HTTP status, with 0 standing in for "no response at all".
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Transport { .. } => 0,
            ApiError::Status { status, .. } | ApiError::MalformedResponse { status, .. } => *status,
        }
    }

    /// What the failing request was fetching.
    pub fn purpose(&self) -> RequestPurpose {
        match self {
            ApiError::Transport { purpose, .. }
            | ApiError::Status { purpose, .. }
            | ApiError::MalformedResponse { purpose, .. } => *purpose,
        }
    }

    /// The requested URL.
    pub fn url(&self) -> &str {
        match self {
            ApiError::Transport { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::MalformedResponse { url, .. } => url,
        }
    }
}
