use crate::frame_ops::schema::{DAY, MONTH, YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The time period observations are bucketed into before aggregation.
///
/// Determines which temporal key columns are derived from a date column and
/// which columns aggregation and joins group on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar month, keyed on `(year, month)`.
    #[default]
    Month,
    /// One bucket per calendar day, keyed on `(year, month, day)`.
    Day,
}

impl Granularity {
    /// The key columns, in grouping order, for this granularity.
    ///
    /// # Examples
    ///
    /// ```
    /// use crime_weather::Granularity;
    ///
    /// assert_eq!(Granularity::Month.keys(), &["year", "month"]);
    /// assert_eq!(Granularity::Day.keys(), &["year", "month", "day"]);
    /// ```
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Granularity::Month => &[YEAR, MONTH],
            Granularity::Day => &[YEAR, MONTH, DAY],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Day => "day",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
