//! The main entry point: a stateful view engine that owns the station
//! selection, the aggregation mode, the zoom window, and the data loaded
//! for them, and that decides when the view requires a fetch.
//!
//! All state lives on one logical task. The [`Explorer`] never fetches
//! behind the caller's back: every dispatch method returns at most one
//! [`LoadPlan`], which the caller executes (inline via [`Explorer::run`] /
//! [`Explorer::sync`], or spawned on its event loop) and resolves through
//! [`Explorer::apply`]. A generation token captured when a load is planned
//! and checked when its outcome is applied guarantees that a superseded
//! load can never overwrite newer data, no matter how late it lands.

use crate::api::client::ApiClient;
use crate::api::messages::user_message;
use crate::error::TrendsError;
use crate::loading::{FetchKey, LoadOutcome, LoadPlan, LoadedData, PendingCommit};
use crate::types::mode::Mode;
use crate::types::responses::Summary;
use crate::view::chart_events::ChartEvent;
use crate::view::palette;
use crate::view::zoom::{
    clamp_window, DatasetBounds, YearRange, ZoomState, MAX_CENTER_YEAR, MIN_CENTER_YEAR,
};
use bon::bon;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Duration;

/// The last applied load: which fetch key it satisfied and what it carried.
#[derive(Debug)]
struct Snapshot {
    key: FetchKey,
    data: LoadedData,
}

/// Stateful explorer over a historical per-station temperature dataset.
///
/// Owns the canonical view state (selection, mode, deviation toggle, zoom)
/// and the data loaded for it, and orchestrates fetches so that the
/// summary and the plotted series always describe the same window and
/// selection.
///
/// # Examples
///
/// ```no_run
/// # use temptrends::{Explorer, Mode, TrendsError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), TrendsError> {
/// let mut explorer = Explorer::builder()
///     .base_url("http://localhost:8000/api".to_string())
///     .build()?;
///
/// // Learn the dataset bounds and the station inventory.
/// explorer.connect().await;
///
/// // Select two stations and bring the view up to date.
/// explorer.set_selection(["STA001", "STA002"]);
/// explorer.sync().await;
///
/// if let Some(data) = explorer.loaded() {
///     println!("mean over window: {:?}", data.summary.mean);
/// }
///
/// // Switching the granularity fetches before committing the mode.
/// if let Some(plan) = explorer.switch_mode(Mode::Annual) {
///     explorer.run(plan).await;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Explorer {
    client: ApiClient,
    bounds: DatasetBounds,
    stations: Vec<String>,
    selection: Vec<String>,
    mode: Mode,
    include_std: bool,
    zoom: ZoomState,
    loaded: Option<Snapshot>,
    /// Key of the last failed load; blocks the passive trigger from
    /// retrying the exact same fetch until the view changes.
    failed_key: Option<FetchKey>,
    banner: Option<String>,
    /// Monotonically increasing load token. Bumped when a load is planned
    /// and on teardown; an outcome whose token no longer matches is stale.
    generation: u64,
    in_flight: Option<u64>,
    closed: bool,
}

#[bon]
impl Explorer {
    /// Creates an explorer talking to the service at `base_url`.
    ///
    /// The zoom starts at the full extent of the default bounds; call
    /// [`Explorer::connect`] to replace them with the service's real
    /// coverage.
    ///
    /// # Arguments
    ///
    /// * `.base_url(String)`: Optional. Root of the service API. Defaults
    ///   to [`crate::DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request deadline. Defaults to
    ///   [`crate::DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::HttpClient`] when the HTTP client cannot be
    /// constructed.
    #[builder]
    pub fn new(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self, TrendsError> {
        let client = ApiClient::builder()
            .maybe_base_url(base_url)
            .maybe_timeout(timeout)
            .build()?;
        let bounds = DatasetBounds::default();
        Ok(Self {
            client,
            bounds,
            stations: Vec::new(),
            selection: Vec::new(),
            mode: Mode::default(),
            include_std: false,
            zoom: ZoomState::full_extent(&bounds),
            loaded: None,
            failed_key: None,
            banner: None,
            generation: 0,
            in_flight: None,
            closed: false,
        })
    }
}

impl Explorer {
    /// Fetches the dataset year coverage and the station inventory.
    ///
    /// When the service reports both bounds, they replace the defaults and
    /// the zoom resets to the new full extent. The station list is fetched
    /// afterwards regardless of whether the range call succeeded. Failures
    /// are recorded in [`Explorer::banner`] rather than returned; startup
    /// continues with whatever state could be established.
    pub async fn connect(&mut self) {
        match self.client.data_range().await {
            Ok(range) => {
                if let (Some(min_year), Some(max_year)) = (range.min_year, range.max_year) {
                    self.bounds = DatasetBounds { min_year, max_year };
                    self.zoom = ZoomState::full_extent(&self.bounds);
                    info!("dataset covers {min_year}..={max_year}");
                }
            }
            Err(error) => {
                warn!("failed to load dataset year range: {error}");
                self.banner = Some(user_message(&error));
            }
        }

        match self.client.stations().await {
            Ok(list) => {
                info!("service reports {} stations", list.stations.len());
                self.stations = list.stations;
            }
            Err(error) => {
                warn!("failed to load station list: {error}");
                self.banner = Some(user_message(&error));
            }
        }
    }

    /// Replaces the station selection.
    ///
    /// Emptying the selection clears the loaded data immediately and
    /// invalidates any load still in flight; a non-empty change leaves the
    /// current data on screen until [`Explorer::poll`] plans the fetch for
    /// the new selection.
    pub fn set_selection<I, S>(&mut self, stations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = stations.into_iter().map(Into::into).collect();
        if self.selection.is_empty() {
            // Nothing will be fetched for an empty selection, so a load
            // still in flight must not land either.
            self.generation += 1;
            self.in_flight = None;
            self.loaded = None;
            self.failed_key = None;
        }
    }

    /// Commits a new center year from the numeric input.
    ///
    /// The center is held to the wide sanity interval
    /// [`MIN_CENTER_YEAR`]`..=`[`MAX_CENTER_YEAR`] but deliberately not to
    /// the dataset bounds; a center outside the bounds yields an empty
    /// plot.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError::CenterYearOutOfRange`] when `year` falls
    /// outside the sanity interval; the zoom is left unchanged.
    pub fn set_center_year(&mut self, year: i32) -> Result<(), TrendsError> {
        if !(MIN_CENTER_YEAR..=MAX_CENTER_YEAR).contains(&year) {
            return Err(TrendsError::CenterYearOutOfRange(year));
        }
        self.zoom.center_year = year;
        Ok(())
    }

    /// Sets the window length, clamped to `[1, span]`.
    pub fn set_window_years(&mut self, window: i32) {
        self.zoom.window_years = clamp_window(window, self.bounds.span());
    }

    /// Resets the zoom to the full dataset extent.
    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomState::full_extent(&self.bounds);
    }

    /// Feeds a chart-originated view change back into the zoom state.
    ///
    /// Returns `true` when the event changed the zoom; an event with an
    /// unparsable endpoint is dropped and `false` is returned. The refetch
    /// for the new window happens on the next [`Explorer::poll`].
    pub fn apply_chart_event(&mut self, event: ChartEvent) -> bool {
        match event.normalize(&self.bounds) {
            Some(zoom) => {
                self.zoom = zoom;
                true
            }
            None => false,
        }
    }

    /// Passive fetch trigger.
    ///
    /// Plans a load when the selection is non-empty, nothing is in flight,
    /// and the key the current view implies matches neither the last
    /// applied load nor the last failed one (failures are not retried
    /// until the view changes). Call this after every state change and
    /// after every [`Explorer::apply`] to keep the view converged.
    pub fn poll(&mut self) -> Option<LoadPlan> {
        if self.closed || self.selection.is_empty() || self.in_flight.is_some() {
            return None;
        }
        let key = self.current_key();
        if self.loaded.as_ref().is_some_and(|s| s.key == key) {
            return None;
        }
        if self.failed_key.as_ref() == Some(&key) {
            return None;
        }
        Some(self.plan_load(key, PendingCommit::default()))
    }

    /// Explicit mode switch.
    ///
    /// With an empty selection the mode flips immediately and no fetch
    /// happens. Otherwise a load for the new mode's key is planned right
    /// away, without waiting for an in-flight load (the fresh generation
    /// token supersedes it), and the mode itself only commits when
    /// that load succeeds. On failure the previous mode and data remain.
    pub fn switch_mode(&mut self, next: Mode) -> Option<LoadPlan> {
        if self.closed || next == self.mode {
            return None;
        }
        if self.selection.is_empty() {
            self.mode = next;
            return None;
        }
        let key = self.key_for(next, self.include_std);
        Some(self.plan_load(
            key,
            PendingCommit {
                mode: Some(next),
                include_std: None,
            },
        ))
    }

    /// Explicit deviation-band toggle.
    ///
    /// Outside annual mode, or with an empty selection, this is a pure
    /// flag flip: the monthly endpoint ignores the flag, so no fetch is
    /// due. In annual mode with a selection, a load for the new flag is
    /// planned and the flag commits together with its data.
    pub fn set_include_std(&mut self, next: bool) -> Option<LoadPlan> {
        if self.closed || next == self.include_std {
            return None;
        }
        if self.mode != Mode::Annual || self.selection.is_empty() {
            self.include_std = next;
            return None;
        }
        let key = self.key_for(Mode::Annual, next);
        Some(self.plan_load(
            key,
            PendingCommit {
                mode: None,
                include_std: Some(next),
            },
        ))
    }

    /// Resolves an executed load.
    ///
    /// An outcome whose generation token no longer matches the current one
    /// (a newer load was planned, the selection emptied, or the explorer
    /// was closed) is discarded silently. A matching success
    /// applies summary, series, and any pending mode/toggle commit
    /// atomically; a matching failure records the translated banner
    /// message and leaves every piece of prior state untouched.
    pub fn apply(&mut self, outcome: LoadOutcome) {
        if outcome.generation != self.generation {
            debug!(
                "discarding stale load result (generation {}, current {})",
                outcome.generation, self.generation
            );
            return;
        }
        self.in_flight = None;
        let LoadOutcome {
            key, commit, result, ..
        } = outcome;
        match result {
            Ok(data) => {
                info!("applied load for {key}");
                if let Some(mode) = commit.mode {
                    self.mode = mode;
                }
                if let Some(include_std) = commit.include_std {
                    self.include_std = include_std;
                }
                self.loaded = Some(Snapshot { key, data });
                self.failed_key = None;
                self.banner = None;
            }
            Err(error) => {
                warn!("load for {key} failed: {error}");
                self.failed_key = Some(key);
                self.banner = Some(user_message(&error));
            }
        }
    }

    /// Executes a planned load inline and applies its outcome.
    ///
    /// Convenience for callers without their own event loop; callers that
    /// spawn loads concurrently use [`LoadPlan::execute`] with a cloned
    /// [`Explorer::api`] client and hand the outcome to
    /// [`Explorer::apply`] themselves.
    pub async fn run(&mut self, plan: LoadPlan) {
        let outcome = plan.execute(&self.client).await;
        self.apply(outcome);
    }

    /// Drives passive loads until the view is converged.
    ///
    /// Terminates because a load either applies (key caught up) or fails
    /// (key parked in the failed slot); there is no retry.
    pub async fn sync(&mut self) {
        while let Some(plan) = self.poll() {
            self.run(plan).await;
        }
    }

    /// Tears the explorer down.
    ///
    /// Any load still in flight becomes stale and can no longer mutate
    /// state; subsequent dispatch calls plan nothing.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
        self.in_flight = None;
    }

    // --- Read accessors ---

    /// The dataset bounds currently in effect.
    pub fn bounds(&self) -> DatasetBounds {
        self.bounds
    }

    /// Station inventory in discovery order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Stable palette color per known station, keyed on discovery order.
    pub fn station_colors(&self) -> HashMap<&str, &'static str> {
        palette::station_colors(&self.stations)
    }

    /// The current selection, insertion order.
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn include_std(&self) -> bool {
        self.include_std
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    /// The concrete year interval the zoom shows right now.
    pub fn derived_range(&self) -> YearRange {
        self.zoom.range(&self.bounds)
    }

    /// The data backing the current plot, when a load has succeeded.
    pub fn loaded(&self) -> Option<&LoadedData> {
        self.loaded.as_ref().map(|s| &s.data)
    }

    /// The summary of the last applied load.
    pub fn summary(&self) -> Option<&Summary> {
        self.loaded.as_ref().map(|s| &s.data.summary)
    }

    /// The current banner message, when the last load (or startup call)
    /// failed.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Whether a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Identity key for chart redraws.
    ///
    /// Derived from exactly the values whose change should move the chart
    /// (the selection and the derived year interval) and from nothing
    /// else. Applying freshly fetched data or toggling the loading state
    /// leaves it unchanged, so a redraw never masquerades as a user zoom.
    pub fn ui_revision(&self) -> String {
        let range = self.derived_range();
        format!(
            "{}|{}-{}",
            self.selection.join(","),
            range.start_year,
            range.end_year
        )
    }

    /// The underlying API client; clone it to execute plans on a spawned
    /// task.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    // --- Internals ---

    fn current_key(&self) -> FetchKey {
        self.key_for(self.mode, self.include_std)
    }

    fn key_for(&self, mode: Mode, include_std: bool) -> FetchKey {
        let range = self.derived_range();
        FetchKey {
            stations: self.selection.join(","),
            start_year: range.start_year,
            end_year: range.end_year,
            mode,
            // The flag only matters on the annual endpoint; normalizing it
            // here keeps a monthly-mode toggle flip out of the key.
            include_std: include_std && mode == Mode::Annual,
        }
    }

    fn plan_load(&mut self, key: FetchKey, commit: PendingCommit) -> LoadPlan {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.banner = None;
        info!("planning load #{} for {key}", self.generation);
        LoadPlan {
            generation: self.generation,
            key,
            commit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{ApiError, ErrorDetail, RequestPurpose};
    use crate::loading::SeriesData;
    use crate::types::responses::{
        AnnualPoint, AnnualSeries, MonthlyPoint, MonthlySeries, Summary,
    };
    use crate::view::chart_events::AxisValue;
    use reqwest::Method;

    fn explorer() -> Explorer {
        let mut explorer = Explorer::builder().build().unwrap();
        explorer.bounds = DatasetBounds {
            min_year: 1900,
            max_year: 2000,
        };
        explorer.zoom = ZoomState::full_extent(&explorer.bounds);
        explorer.stations = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        explorer
    }

    fn monthly_data() -> LoadedData {
        LoadedData {
            summary: Summary {
                count: 24,
                mean: Some(9.4),
                std: Some(1.1),
                min: Some(6.2),
                max: Some(12.9),
            },
            series: SeriesData::Monthly(vec![MonthlySeries {
                station: "A".to_string(),
                points: vec![MonthlyPoint {
                    year: 1950,
                    month: 1,
                    value: 3.4,
                }],
            }]),
        }
    }

    fn annual_data(with_band: bool) -> LoadedData {
        let band = |v: f64| if with_band { Some(v) } else { None };
        LoadedData {
            summary: Summary {
                count: 101,
                mean: Some(9.9),
                std: Some(0.8),
                min: Some(8.0),
                max: Some(11.6),
            },
            series: SeriesData::Annual(vec![AnnualSeries {
                station: "A".to_string(),
                points: vec![AnnualPoint {
                    year: 1950,
                    mean: 9.9,
                    std: band(0.8),
                    lower: band(9.1),
                    upper: band(10.7),
                }],
            }]),
        }
    }

    fn success(plan: LoadPlan, data: LoadedData) -> LoadOutcome {
        LoadOutcome {
            generation: plan.generation,
            key: plan.key,
            commit: plan.commit,
            result: Ok(data),
        }
    }

    fn failure(plan: LoadPlan) -> LoadOutcome {
        LoadOutcome {
            generation: plan.generation,
            key: plan.key,
            commit: plan.commit,
            result: Err(ApiError::Status {
                status: 500,
                url: "http://localhost:8000/api/analytics/summary".to_string(),
                method: Method::GET,
                purpose: RequestPurpose::Summary,
                content_type: None,
                detail: ErrorDetail::Empty,
            }),
        }
    }

    #[test]
    fn poll_is_idle_without_a_selection() {
        let mut ex = explorer();
        assert!(ex.poll().is_none());
    }

    #[test]
    fn unchanged_fetch_key_plans_no_duplicate_load() {
        let mut ex = explorer();
        ex.set_selection(["A", "B"]);

        let plan = ex.poll().expect("first poll plans a load");
        assert_eq!(plan.key().stations, "A,B");
        assert_eq!(plan.key().start_year, 1900);
        assert_eq!(plan.key().end_year, 2000);
        ex.apply(success(plan, monthly_data()));

        // Same view, same key: converged.
        assert!(ex.poll().is_none());
        assert!(ex.loaded().is_some());
    }

    #[test]
    fn poll_waits_while_a_load_is_in_flight() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let _plan = ex.poll().expect("plans a load");
        assert!(ex.is_loading());
        assert!(ex.poll().is_none());
    }

    #[test]
    fn window_and_center_derive_the_expected_range() {
        let mut ex = explorer();
        ex.set_selection(["A", "B"]);
        ex.set_center_year(1950).unwrap();
        ex.set_window_years(101);
        let plan = ex.poll().unwrap();
        assert_eq!(plan.key().start_year, 1900);
        assert_eq!(plan.key().end_year, 2000);
        assert_eq!(plan.key().mode, Mode::Monthly);
    }

    #[test]
    fn mode_switch_with_empty_selection_is_a_pure_flip() {
        let mut ex = explorer();
        assert!(ex.switch_mode(Mode::Annual).is_none());
        assert_eq!(ex.mode(), Mode::Annual);
        assert!(!ex.is_loading());
    }

    #[test]
    fn mode_switch_commits_only_with_its_data() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        let plan = ex.switch_mode(Mode::Annual).expect("plans a load");
        assert_eq!(plan.key().mode, Mode::Annual);
        // Not committed yet.
        assert_eq!(ex.mode(), Mode::Monthly);

        ex.apply(success(plan, annual_data(false)));
        assert_eq!(ex.mode(), Mode::Annual);
        assert!(ex.loaded().unwrap().series.as_annual().is_some());
    }

    #[test]
    fn failed_mode_switch_keeps_mode_and_data() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        let plan = ex.switch_mode(Mode::Annual).unwrap();
        ex.apply(failure(plan));

        assert_eq!(ex.mode(), Mode::Monthly);
        assert!(ex.loaded().unwrap().series.as_monthly().is_some());
        assert!(ex.banner().is_some());
        // The old view is still loaded, so nothing refetches by itself.
        assert!(ex.poll().is_none());
    }

    #[test]
    fn deviation_toggle_outside_annual_mode_is_a_pure_flip() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        assert!(ex.set_include_std(true).is_none());
        assert!(ex.include_std());
        // The key is normalized outside annual mode: still converged.
        assert!(ex.poll().is_none());
    }

    #[test]
    fn deviation_toggle_in_annual_mode_fetches_before_committing() {
        let mut ex = explorer();
        // Flipped while the selection is still empty, so no fetch yet.
        assert!(ex.switch_mode(Mode::Annual).is_none());
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        assert_eq!(plan.key().mode, Mode::Annual);
        ex.apply(success(plan, annual_data(false)));

        let plan = ex.set_include_std(true).expect("plans a load");
        assert!(plan.key().include_std);
        assert!(!ex.include_std(), "not committed yet");

        ex.apply(success(plan, annual_data(true)));
        assert!(ex.include_std());
        let series = ex.loaded().unwrap().series.as_annual().unwrap();
        assert_eq!(series[0].points[0].lower, Some(9.1));
        assert_eq!(series[0].points[0].upper, Some(10.7));
    }

    #[test]
    fn superseded_load_is_discarded_on_arrival() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        // A passive load for a new window goes out...
        ex.set_window_years(10);
        let stale_plan = ex.poll().unwrap();
        // ...and is superseded by an explicit mode switch before it lands.
        let fresh_plan = ex.switch_mode(Mode::Annual).unwrap();

        let stale = success(stale_plan, monthly_data());
        let fresh = success(fresh_plan, annual_data(false));

        ex.apply(fresh);
        assert_eq!(ex.mode(), Mode::Annual);

        ex.apply(stale);
        // The late monthly result must not overwrite the newer annual one.
        assert_eq!(ex.mode(), Mode::Annual);
        assert!(ex.loaded().unwrap().series.as_annual().is_some());
    }

    #[test]
    fn stale_result_is_discarded_even_before_the_fresh_one_lands() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let stale_plan = ex.poll().unwrap();
        let fresh_plan = ex.switch_mode(Mode::Annual).unwrap();

        ex.apply(success(stale_plan, monthly_data()));
        assert!(ex.loaded().is_none(), "superseded load must not apply");
        assert!(ex.is_loading(), "the fresh load is still in flight");

        ex.apply(success(fresh_plan, annual_data(false)));
        assert!(ex.loaded().unwrap().series.as_annual().is_some());
    }

    #[test]
    fn failed_passive_load_is_not_retried_until_the_view_changes() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(failure(plan));

        assert!(ex.banner().is_some());
        assert!(ex.poll().is_none(), "no automatic retry");

        // Changing the window changes the key and lifts the block.
        ex.set_window_years(10);
        assert!(ex.poll().is_some());
    }

    #[test]
    fn emptying_the_selection_clears_data_and_invalidates_the_flight() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let first = ex.poll().unwrap();
        ex.apply(success(first, monthly_data()));

        ex.set_window_years(10);
        let in_flight = ex.poll().unwrap();

        ex.set_selection(Vec::<String>::new());
        assert!(ex.loaded().is_none());

        // The in-flight load lands after the selection emptied.
        ex.apply(success(in_flight, monthly_data()));
        assert!(ex.loaded().is_none(), "stale load must not resurrect data");
        assert!(ex.poll().is_none());
    }

    #[test]
    fn close_makes_every_in_flight_load_stale() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.close();
        ex.apply(success(plan, monthly_data()));
        assert!(ex.loaded().is_none());
        assert!(ex.poll().is_none());
        assert!(ex.switch_mode(Mode::Annual).is_none());
    }

    #[test]
    fn chart_range_event_moves_the_zoom_and_triggers_a_fetch() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        let moved = ex.apply_chart_event(ChartEvent::Range(
            "1950-01-01".into(),
            "1980-12-31".into(),
        ));
        assert!(moved);
        assert_eq!(ex.zoom().window_years, 31);
        assert_eq!(ex.zoom().center_year, 1965);

        let plan = ex.poll().expect("new window needs a fetch");
        assert_eq!(plan.key().start_year, 1950);
        assert_eq!(plan.key().end_year, 1980);
    }

    #[test]
    fn unparsable_chart_event_changes_nothing() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));

        let before = ex.zoom();
        let moved = ex.apply_chart_event(ChartEvent::Range("".into(), AxisValue::Year(1980.0)));
        assert!(!moved);
        assert_eq!(ex.zoom(), before);
        assert!(ex.poll().is_none());
    }

    #[test]
    fn autorange_event_resets_to_the_full_extent() {
        let mut ex = explorer();
        ex.set_selection(["A"]);
        ex.set_window_years(10);
        assert!(ex.apply_chart_event(ChartEvent::Autorange));
        assert_eq!(ex.zoom(), ZoomState::full_extent(&ex.bounds()));
    }

    #[test]
    fn center_year_commit_enforces_the_sanity_interval() {
        let mut ex = explorer();
        assert!(ex.set_center_year(999).is_err());
        assert!(ex.set_center_year(3001).is_err());
        // Outside the dataset bounds is fine on purpose.
        ex.set_center_year(2500).unwrap();
        assert_eq!(ex.zoom().center_year, 2500);
    }

    #[test]
    fn ui_revision_tracks_only_selection_and_range() {
        let mut ex = explorer();
        ex.set_selection(["A", "B"]);
        let before = ex.ui_revision();
        assert_eq!(before, "A,B|1900-2000");

        // Applying data and toggling flags must not move the identity.
        let plan = ex.poll().unwrap();
        ex.apply(success(plan, monthly_data()));
        assert!(ex.set_include_std(true).is_none());
        assert_eq!(ex.ui_revision(), before);

        ex.set_window_years(31);
        assert_ne!(ex.ui_revision(), before);
    }

    #[test]
    fn station_colors_are_keyed_on_discovery_order() {
        let ex = explorer();
        let colors = ex.station_colors();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors["A"], crate::view::palette::STATION_PALETTE[0]);
        assert_eq!(colors["C"], crate::view::palette::STATION_PALETTE[2]);
    }
}
