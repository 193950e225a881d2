use crate::api::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to construct the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("center year {0} must be between 1000 and 3000")]
    CenterYearOutOfRange(i32),
}
