//! Wire payloads returned by the temperature service.
//!
//! Every numeric statistic that can be undefined on the server side (for
//! example over an empty selection or an empty window) is an `Option`; the
//! service sends explicit `null` for those.

use serde::Deserialize;

/// Year coverage reported by the range endpoint.
///
/// Both fields are `null` when the dataset is empty, in which case the
/// client keeps its default bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DataRange {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// The station inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StationList {
    pub count: usize,
    /// Station identifiers in the service's discovery order. This order is
    /// what the stable color assignment is keyed on.
    pub stations: Vec<String>,
}

/// Aggregate statistics over the selected stations and year window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Summary {
    /// Number of observations that contributed to the statistics.
    pub count: u64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    pub value: f64,
}

/// All monthly observations for one station, ordered chronologically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlySeries {
    pub station: String,
    pub points: Vec<MonthlyPoint>,
}

/// Monthly series for every requested station.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonthlyData {
    pub stations: Vec<MonthlySeries>,
}

/// One yearly aggregate.
///
/// `std`, `lower` and `upper` are present only when the deviation band was
/// requested, and `std` can still be `null` for years with a single
/// observation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnnualPoint {
    pub year: i32,
    pub mean: f64,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

/// All yearly aggregates for one station, ordered chronologically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnualSeries {
    pub station: String,
    pub points: Vec<AnnualPoint>,
}

/// Annual series for every requested station.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnualData {
    pub stations: Vec<AnnualSeries>,
}
