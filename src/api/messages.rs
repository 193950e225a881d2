//! Maps a classified [`ApiError`] to the message shown in the error banner.
//!
//! The rules mirror the service's failure vocabulary: connectivity problems,
//! unknown stations, request validation, missing data-source configuration,
//! and everything else in descending order of specificity.

use crate::api::error::{ApiError, ErrorDetail, RequestPurpose};

/// How many missing stations are spelled out before collapsing the rest
/// into a `(+N more)` suffix.
const MISSING_STATIONS_SHOWN: usize = 6;

/// Translates an [`ApiError`] into user-facing guidance.
///
/// Pure; the same error always yields the same message. Messages never
/// expose URLs or raw bodies, only the request's purpose label and, for
/// missing stations, the offending identifiers.
///
/// # Examples
///
/// ```
/// use temptrends::{user_message, ApiError, ErrorDetail, RequestPurpose};
/// use reqwest::Method;
///
/// let error = ApiError::Status {
///     status: 422,
///     url: "http://localhost:8000/api/data/monthly".to_string(),
///     method: Method::GET,
///     purpose: RequestPurpose::MonthlyData,
///     content_type: None,
///     detail: ErrorDetail::Text("stations is required".to_string()),
/// };
/// assert_eq!(user_message(&error), "Select at least one station to load data.");
/// ```
pub fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::Transport { .. } => {
            "Can’t reach the server. Check that the API is running (and not blocked by CORS), \
             then try again."
                .to_string()
        }
        ApiError::Status {
            status,
            purpose,
            detail,
            ..
        } => status_message(*status, *purpose, detail),
        ApiError::MalformedResponse { purpose, .. } => {
            format!("Unexpected server response while loading {purpose}. Please try again.")
        }
    }
}

fn status_message(status: u16, purpose: RequestPurpose, detail: &ErrorDetail) -> String {
    if status == 404 {
        if purpose.is_selection_scoped() {
            if let Some(missing) = detail.missing_stations() {
                return format!(
                    "Some selected stations aren’t available in the dataset ({}). \
                     Remove them and try again.",
                    format_station_list(missing)
                );
            }
        }
        return format!("Not found while loading {purpose}.");
    }

    if status == 422 {
        if let Some(reason) = detail.as_text() {
            if reason.contains("stations is required") {
                return "Select at least one station to load data.".to_string();
            }
            if reason.contains("start_year must be <=") {
                return "Invalid year range. Start year must be ≤ end year.".to_string();
            }
        }
        return format!("Invalid request while loading {purpose}.");
    }

    if status >= 500 {
        if detail
            .as_text()
            .is_some_and(|reason| reason.contains("CSV_PATH not found"))
        {
            return "The server can’t find the CSV dataset. Set `CSV_PATH` (or mount the data \
                    file) and reload."
                .to_string();
        }
        return format!("Server error while loading {purpose}. Please try again.");
    }

    format!("Request failed while loading {purpose} ({status}).")
}

/// Deduplicates, sorts and caps the missing-station list for display.
fn format_station_list(stations: Vec<String>) -> String {
    let mut unique: Vec<String> = stations.into_iter().filter(|s| !s.is_empty()).collect();
    unique.sort();
    unique.dedup();
    if unique.len() <= MISSING_STATIONS_SHOWN {
        return unique.join(", ");
    }
    let extra = unique.len() - MISSING_STATIONS_SHOWN;
    format!(
        "{} (+{extra} more)",
        unique[..MISSING_STATIONS_SHOWN].join(", ")
    )
}
