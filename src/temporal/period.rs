use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A half-open range of years, `start <= year < end`.
///
/// Every aggregation drops rows whose `year` falls outside the configured range.
/// The default covers 2012 up to, but not including, 2018: the span for which
/// the weather, pollution and crime sources all have data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(self, year: i32) -> bool {
        year >= self.start && year < self.end
    }

    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(2012, 2018)
    }
}

impl Display for YearRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:04}, {:04})", self.start, self.end)
    }
}
