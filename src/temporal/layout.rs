//! How a source encodes its dates, and therefore how the temporal key is derived.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// The textual layout of a date column.
///
/// There is no auto-detection: each source declares its layout up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateLayout {
    /// Parse the column with a strptime format such as `%Y-%m-%d %H:%M:%S`.
    ///
    /// Columns already typed as `Date` or `Datetime` are used as-is.
    Parsed { format: String },
    /// Fixed offsets of an `MM/DD/YYYY[ ...]` string: month at `[0, 2)`,
    /// day at `[3, 5)` and year at `[6, 10)`. Anything after the year is ignored.
    MonthDayYear,
}

impl DateLayout {
    pub fn parsed(format: &str) -> Self {
        DateLayout::Parsed {
            format: format.to_string(),
        }
    }

    /// Returns `false` when a `Parsed` format contains an unknown specifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use crime_weather::DateLayout;
    ///
    /// assert!(DateLayout::parsed("%Y-%m-%d").is_valid());
    /// assert!(!DateLayout::parsed("%Y-%Q").is_valid());
    /// assert!(DateLayout::MonthDayYear.is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        match self {
            DateLayout::Parsed { format } => {
                !format.is_empty()
                    && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
            }
            DateLayout::MonthDayYear => true,
        }
    }
}
