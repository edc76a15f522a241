//! Describes the input datasets: which weather variables exist, where their files live and
//! how each source encodes its dates.

use crate::temporal::layout::DateLayout;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory, relative to the data directory, holding one CSV per weather variable.
pub const WEATHER_DIR: &str = "historical-hourly-weather-data";

/// A weather variable. Each has its own file with a `datetime` column and one column per city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIndex {
    /// Relative humidity, percent.
    Humidity,
    /// Atmospheric pressure, hPa.
    Pressure,
    /// Temperature, Kelvin.
    Temperature,
    /// Wind direction, degrees.
    WindDirection,
    /// Wind speed, m/s.
    WindSpeed,
}

impl WeatherIndex {
    pub const ALL: [WeatherIndex; 5] = [
        WeatherIndex::Humidity,
        WeatherIndex::Pressure,
        WeatherIndex::Temperature,
        WeatherIndex::WindDirection,
        WeatherIndex::WindSpeed,
    ];

    pub(crate) fn file_name(&self) -> &'static str {
        match self {
            WeatherIndex::Humidity => "humidity.csv",
            WeatherIndex::Pressure => "pressure.csv",
            WeatherIndex::Temperature => "temperature.csv",
            WeatherIndex::WindDirection => "wind_direction.csv",
            WeatherIndex::WindSpeed => "wind_speed.csv",
        }
    }

    /// Column name the index's values get once a city has been selected, and the value of
    /// `indextype` in stacked tables.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherIndex::Humidity => "Humidity",
            WeatherIndex::Pressure => "Pressure",
            WeatherIndex::Temperature => "Temperature",
            WeatherIndex::WindDirection => "wind_direction",
            WeatherIndex::WindSpeed => "wind_speed",
        }
    }
}

impl fmt::Display for WeatherIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a source keeps its date and how it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSchema {
    pub date_column: String,
    pub layout: DateLayout,
}

impl SourceSchema {
    pub fn new(date_column: &str, layout: DateLayout) -> Self {
        Self {
            date_column: date_column.to_string(),
            layout,
        }
    }

    /// Hourly weather files: `datetime` as `2012-10-01 12:00:00`.
    pub fn weather() -> Self {
        Self::new("datetime", DateLayout::parsed("%Y-%m-%d %H:%M:%S"))
    }

    /// US pollution measurements: `Date Local` as `2000-01-01`.
    pub fn pollution() -> Self {
        Self::new("Date Local", DateLayout::parsed("%Y-%m-%d"))
    }

    /// Chicago crime reports: `Date` as `12/24/2015 11:00:00 PM`.
    pub fn chicago_crime() -> Self {
        Self::new("Date", DateLayout::MonthDayYear)
    }

    /// Los Angeles crime reports: `Date Occurred` as `12/24/2015`.
    pub fn los_angeles_crime() -> Self {
        Self::new("Date Occurred", DateLayout::MonthDayYear)
    }
}
