mod api;
mod error;
mod explorer;
mod loading;
mod types;
mod view;

pub use error::TrendsError;
pub use explorer::*;

pub use api::client::{ApiClient, DataParams, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use api::error::{ApiError, ErrorDetail, RequestPurpose};
pub use api::messages::user_message;

pub use loading::{FetchKey, LoadOutcome, LoadPlan, LoadedData, SeriesData};

pub use types::mode::Mode;
pub use types::responses::{
    AnnualData, AnnualPoint, AnnualSeries, DataRange, MonthlyData, MonthlyPoint, MonthlySeries,
    StationList, Summary,
};

pub use view::chart_events::{AxisValue, ChartEvent};
pub use view::palette::{station_colors, STATION_PALETTE};
pub use view::zoom::{
    clamp_window, DatasetBounds, YearRange, ZoomState, MAX_CENTER_YEAR, MIN_CENTER_YEAR,
};
