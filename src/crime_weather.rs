//! This module provides the main entry point: a client that loads the weather, pollution and
//! crime files named by a [`PipelineConfig`] and produces the per-city comparison tables.

use crate::category::normalizer::CategoryNormalizer;
use crate::config::PipelineConfig;
use crate::error::CrimeWeatherError;
use crate::frames::crime_frame::CrimeFrame;
use crate::frames::pollution_frame::PollutionFrame;
use crate::frames::report::{city_crime_weather, merge_city_weather, stack_city_indices};
use crate::frames::weather_frame::WeatherFrame;
use crate::ingest::loader::TableLoader;
use crate::ingest::source::{WeatherIndex, WEATHER_DIR};
use crate::temporal::granularity::Granularity;
use bon::bon;
use log::info;
use polars::prelude::LazyFrame;
use std::path::{Path, PathBuf};

/// The main client struct for building crime and weather comparison tables.
///
/// It owns the configuration, a [`TableLoader`] rooted at the configured data directory and
/// the compiled [`CategoryNormalizer`]. All returned frames are lazy; nothing is read from
/// disk until they are collected.
///
/// # Examples
///
/// ```no_run
/// # use crime_weather::{CrimeWeather, CrimeWeatherError, Granularity, PipelineConfig, WeatherIndex};
/// # fn run() -> Result<(), CrimeWeatherError> {
/// let client = CrimeWeather::new(PipelineConfig {
///     data_dir: "./data".into(),
///     ..Default::default()
/// })?;
///
/// let chicago = client
///     .city_crime_weather()
///     .city("Chicago")
///     .crime_file("Chicago_crime_2012-2017.csv")
///     .indices(&[WeatherIndex::Temperature, WeatherIndex::Humidity])
///     .granularity(Granularity::Day)
///     .call()?
///     .collect()?;
/// println!("{chicago}");
/// # Ok(())
/// # }
/// ```
pub struct CrimeWeather {
    config: PipelineConfig,
    loader: TableLoader,
    normalizer: CategoryNormalizer,
}

#[bon]
impl CrimeWeather {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CrimeWeatherError::Config`] if the configuration is invalid or a category
    /// rule does not compile.
    pub fn new(config: PipelineConfig) -> Result<Self, CrimeWeatherError> {
        config.validate()?;
        let normalizer = CategoryNormalizer::new(&config.rules)?;
        Ok(Self {
            loader: TableLoader::new(&config.data_dir),
            normalizer,
            config,
        })
    }

    /// Creates a client from a JSON configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, CrimeWeatherError> {
        Self::new(PipelineConfig::from_json_file(path)?)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &CategoryNormalizer {
        &self.normalizer
    }

    /// Scans the file of one weather variable.
    pub fn weather(&self, index: WeatherIndex) -> Result<WeatherFrame, CrimeWeatherError> {
        let path: PathBuf = [WEATHER_DIR, index.file_name()].iter().collect();
        let frame = self.loader.read_csv(path)?;
        Ok(WeatherFrame::new(frame, index, self.config.weather.clone()))
    }

    /// Scans a crime report file.
    pub fn crime(&self, file_name: &str) -> Result<CrimeFrame, CrimeWeatherError> {
        let frame = self.loader.read_csv(file_name)?;
        Ok(CrimeFrame::new(frame, self.config.crime.clone()))
    }

    /// Scans a pollution measurement file.
    pub fn pollution(&self, file_name: &str) -> Result<PollutionFrame, CrimeWeatherError> {
        let frame = self.loader.read_csv(file_name)?;
        Ok(PollutionFrame::new(frame, self.config.pollution.clone()))
    }

    /// Crime counts per period, optionally split by normalized crime type.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.granularity(Granularity)`: defaults to [`Granularity::Month`].
    /// * `.by_type(bool)`: normalize the description column and add `type` to the key.
    ///   Defaults to `false`.
    #[builder]
    pub fn crime_counts(
        &self,
        crime_file: &str,
        #[builder(default)] granularity: Granularity,
        #[builder(default)] by_type: bool,
    ) -> Result<LazyFrame, CrimeWeatherError> {
        let crimes = self.crime(crime_file)?;
        let years = self.config.years;
        let counts = if by_type {
            crimes
                .with_crime_type(&self.normalizer, &self.config.crime_description_column)?
                .counts_by_type(granularity, years)?
        } else {
            crimes.counts(granularity, years)?
        };
        Ok(counts)
    }

    /// One column per requested weather index for `city`, merged on the temporal key.
    #[builder]
    pub fn city_weather(
        &self,
        city: &str,
        indices: &[WeatherIndex],
        #[builder(default)] granularity: Granularity,
    ) -> Result<LazyFrame, CrimeWeatherError> {
        let weather = self.load_indices(indices)?;
        Ok(merge_city_weather(&weather, city, granularity, self.config.years)?)
    }

    /// Stacked weather indices for `city` with the city's crime count per period.
    ///
    /// The columns are the temporal key, `indexvalue`, `indextype` and `count`.
    #[builder]
    pub fn city_crime_weather(
        &self,
        city: &str,
        crime_file: &str,
        indices: &[WeatherIndex],
        #[builder(default)] granularity: Granularity,
    ) -> Result<LazyFrame, CrimeWeatherError> {
        let years = self.config.years;
        let weather = self.load_indices(indices)?;
        let stacked = stack_city_indices(&weather, city, granularity, years)?;
        let counts = self.crime(crime_file)?.counts(granularity, years)?;
        info!(
            "Joining {} crime counts per {} onto {} weather indices",
            city,
            granularity,
            weather.len()
        );
        Ok(city_crime_weather(stacked, counts, granularity, years)?)
    }

    /// Monthly means of the pollution measurements taken in `city`.
    #[builder]
    pub fn city_pollution(
        &self,
        city: &str,
        pollution_file: &str,
    ) -> Result<LazyFrame, CrimeWeatherError> {
        Ok(self.pollution(pollution_file)?.city_monthly_means(
            &self.config.pollution_city_column,
            city,
            self.config.years,
        )?)
    }

    fn load_indices(&self, indices: &[WeatherIndex]) -> Result<Vec<WeatherFrame>, CrimeWeatherError> {
        indices.iter().map(|index| self.weather(*index)).collect()
    }
}
