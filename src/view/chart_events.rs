//! Normalizes raw view-change notifications coming back from the chart
//! into canonical [`ZoomState`] updates.
//!
//! The chart reports either "autorange enabled" (the user zoomed fully out
//! or double-clicked to reset) or a pair of axis endpoints. Endpoints arrive
//! as plain year numbers on the annual axis and as date-like strings
//! (`"1950-01-01"`) on the monthly axis, depending on the axis type in use.

use crate::view::zoom::{clamp_window, DatasetBounds, ZoomState};
use log::debug;

/// One endpoint of the chart's x-axis range, as reported by the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValue {
    /// A numeric year, possibly fractional after a drag.
    Year(f64),
    /// A date-like string; only the leading four characters are meaningful.
    Timestamp(String),
}

impl AxisValue {
    /// Resolves the endpoint to an integer year.
    ///
    /// Numbers are rounded to the nearest year; strings contribute their
    /// first four characters parsed as an integer. Returns `None` when the
    /// endpoint cannot be interpreted, in which case the whole event is
    /// dropped by [`ChartEvent::normalize`].
    fn to_year(&self) -> Option<i32> {
        match self {
            AxisValue::Year(v) if v.is_finite() => Some(v.round() as i32),
            AxisValue::Year(_) => None,
            // `get` rather than slicing: a short string or a multi-byte
            // character in the first four bytes yields None, not a panic.
            AxisValue::Timestamp(s) => s.get(..4)?.parse::<i32>().ok(),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        AxisValue::Year(v)
    }
}

impl From<&str> for AxisValue {
    fn from(s: &str) -> Self {
        AxisValue::Timestamp(s.to_string())
    }
}

/// A view-change notification emitted by the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The chart returned to its own "fit all data" state; the zoom resets
    /// to the full dataset extent.
    Autorange,
    /// The x-axis was dragged or zoomed to the given endpoints. The
    /// endpoints may arrive in either order.
    Range(AxisValue, AxisValue),
}

impl ChartEvent {
    /// Converts the event into the zoom it implies, or `None` when the
    /// event is unusable and must be ignored without touching state.
    pub fn normalize(&self, bounds: &DatasetBounds) -> Option<ZoomState> {
        match self {
            ChartEvent::Autorange => Some(ZoomState::full_extent(bounds)),
            ChartEvent::Range(a, b) => {
                let (ya, yb) = match (a.to_year(), b.to_year()) {
                    (Some(ya), Some(yb)) => (ya, yb),
                    _ => {
                        debug!("dropping chart range event with unparsable endpoints {a:?}, {b:?}");
                        return None;
                    }
                };
                let start = ya.min(yb);
                let end = ya.max(yb);
                Some(ZoomState {
                    window_years: clamp_window(end - start + 1, bounds.span()),
                    center_year: (f64::from(start + end) / 2.0).round() as i32,
                })
            }
        }
    }
}
