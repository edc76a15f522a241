//! Pipeline configuration: where the data lives, which years to keep, how each source writes
//! its dates and which rules normalize crime descriptions.

use crate::category::label::CrimeType;
use crate::category::rules::RuleTable;
use crate::ingest::source::SourceSchema;
use crate::temporal::period::YearRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Invalid date layout for column '{column}'")]
    InvalidDateLayout { column: String },

    #[error("Year range {0} contains no years")]
    EmptyYearRange(YearRange),

    #[error("Invalid pattern in the {label} rule group")]
    InvalidRule {
        label: CrimeType,
        #[source]
        source: regex::Error,
    },
}

/// Settings for a [`crate::CrimeWeather`] pipeline.
///
/// Every field has a default, so a JSON config only needs the fields it changes:
///
/// ```
/// use crime_weather::{PipelineConfig, YearRange};
///
/// let config: PipelineConfig = serde_json::from_str(r#"{
///     "data_dir": "/data/city-crime",
///     "years": { "start": 2013, "end": 2016 }
/// }"#).unwrap();
///
/// assert_eq!(config.years, YearRange::new(2013, 2016));
/// assert_eq!(config.crime.date_column, "Date");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root directory input files are resolved against.
    pub data_dir: PathBuf,
    /// Rows outside this window never reach an aggregate.
    pub years: YearRange,
    pub weather: SourceSchema,
    pub pollution: SourceSchema,
    /// Column of the pollution table naming the measurement site's city.
    pub pollution_city_column: String,
    pub crime: SourceSchema,
    /// Free-text column of the crime table fed to the category normalizer.
    pub crime_description_column: String,
    pub rules: RuleTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            years: YearRange::default(),
            weather: SourceSchema::weather(),
            pollution: SourceSchema::pollution(),
            pollution_city_column: "City".to_string(),
            crime: SourceSchema::chicago_crime(),
            crime_description_column: "Primary Type".to_string(),
            rules: RuleTable::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: PipelineConfig =
            serde_json::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the year window and every date layout.
    ///
    /// Rule patterns are checked when they are compiled by [`crate::CategoryNormalizer::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.is_empty() {
            return Err(ConfigError::EmptyYearRange(self.years));
        }
        for schema in [&self.weather, &self.pollution, &self.crime] {
            if !schema.layout.is_valid() {
                return Err(ConfigError::InvalidDateLayout {
                    column: schema.date_column.clone(),
                });
            }
        }
        Ok(())
    }
}
