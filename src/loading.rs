//! The load lifecycle: what a single fetch is for, how it executes, and
//! what comes back to be applied.
//!
//! A load is the unit of atomicity. It always carries two requests,
//! the analytics summary and the series data for the current granularity,
//! issued concurrently; their results are only ever applied together, so
//! the summary and the plot can never describe different windows or
//! selections.

use crate::api::client::{ApiClient, DataParams};
use crate::api::error::ApiError;
use crate::types::mode::Mode;
use crate::types::responses::{AnnualSeries, MonthlySeries, Summary};
use futures_util::future::try_join;
use std::fmt;

/// Fingerprint of "what should currently be loaded".
///
/// Two view states with equal keys are equivalent for fetch purposes; the
/// orchestrator compares the key of the last applied load against the key
/// the current view implies to decide whether a fetch is due.
///
/// `include_std` is normalized to `false` outside annual mode, since the
/// monthly endpoint ignores the flag; flipping the toggle while monthly
/// data is shown therefore leaves the key unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    /// Comma-joined selection, insertion order.
    pub stations: String,
    pub start_year: i32,
    pub end_year: i32,
    pub mode: Mode,
    pub include_std: bool,
}

impl FetchKey {
    /// The shared request parameters this key implies.
    pub(crate) fn params(&self) -> DataParams {
        DataParams {
            stations: self.stations.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
        }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stations={}&start_year={}&end_year={}|{}|{}",
            self.stations,
            self.start_year,
            self.end_year,
            self.mode,
            if self.include_std { "std1" } else { "std0" }
        )
    }
}

/// The series half of a successful load, tagged by granularity.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    Monthly(Vec<MonthlySeries>),
    Annual(Vec<AnnualSeries>),
}

impl SeriesData {
    pub fn as_monthly(&self) -> Option<&[MonthlySeries]> {
        match self {
            SeriesData::Monthly(series) => Some(series),
            SeriesData::Annual(_) => None,
        }
    }

    pub fn as_annual(&self) -> Option<&[AnnualSeries]> {
        match self {
            SeriesData::Annual(series) => Some(series),
            SeriesData::Monthly(_) => None,
        }
    }
}

/// Everything a successful load produced, applied wholesale or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub summary: Summary,
    pub series: SeriesData,
}

/// View-state changes that commit together with a load's data.
///
/// An explicit mode switch or deviation toggle only takes effect once the
/// data for the new setting has arrived; a failed load leaves the old
/// setting (and the old data) in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PendingCommit {
    pub(crate) mode: Option<Mode>,
    pub(crate) include_std: Option<bool>,
}

/// A planned load: the fetch key to satisfy, the generation token that
/// decides whether its result is still wanted when it lands, and any
/// view-state commit riding on it.
///
/// Produced by the [`crate::Explorer`] dispatch methods; executed with
/// [`LoadPlan::execute`]; resolved by [`crate::Explorer::apply`].
#[derive(Debug)]
#[must_use = "a planned load does nothing until executed and applied"]
pub struct LoadPlan {
    pub(crate) generation: u64,
    pub(crate) key: FetchKey,
    pub(crate) commit: PendingCommit,
}

impl LoadPlan {
    /// The generation token captured when this load was planned.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// What this load will fetch.
    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    /// Runs the load's two requests concurrently.
    ///
    /// Both requests must succeed for the outcome to carry data; the first
    /// failure fails the load as a whole and no partial result survives.
    /// The returned outcome must be handed back to
    /// [`crate::Explorer::apply`], which decides by generation whether
    /// it still applies.
    pub async fn execute(self, client: &ApiClient) -> LoadOutcome {
        let params = self.key.params();
        let result = match self.key.mode {
            Mode::Monthly => try_join(client.summary(&params), client.monthly(&params))
                .await
                .map(|(summary, monthly)| LoadedData {
                    summary,
                    series: SeriesData::Monthly(monthly.stations),
                }),
            Mode::Annual => try_join(
                client.summary(&params),
                client.annual(&params, self.key.include_std),
            )
            .await
            .map(|(summary, annual)| LoadedData {
                summary,
                series: SeriesData::Annual(annual.stations),
            }),
        };
        LoadOutcome {
            generation: self.generation,
            key: self.key,
            commit: self.commit,
            result,
        }
    }
}

/// The resolution of one executed load, successful or not.
#[derive(Debug)]
pub struct LoadOutcome {
    pub(crate) generation: u64,
    pub(crate) key: FetchKey,
    pub(crate) commit: PendingCommit,
    pub(crate) result: Result<LoadedData, ApiError>,
}

impl LoadOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
