//! Defines the aggregation granularity for series data.

use std::fmt;

/// The aggregation granularity of the plotted series.
///
/// Monthly mode plots one value per station per month; annual mode plots
/// the per-station yearly mean, optionally with a deviation band around it
/// (see [`crate::Explorer::set_include_std`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// One data point per station per month.
    #[default]
    Monthly,
    /// One data point per station per year (mean over the year's months).
    Annual,
}

impl Mode {
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Mode::Monthly => "monthly",
            Mode::Annual => "annual",
        }
    }
}

/// Formats a `Mode` using its `path_segment`.
///
/// # Examples
///
/// ```
/// use temptrends::Mode;
///
/// assert_eq!(format!("{}", Mode::Monthly), "monthly");
/// assert_eq!(Mode::Annual.to_string(), "annual");
/// ```
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}
