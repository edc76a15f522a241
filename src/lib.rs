mod category;
mod config;
mod crime_weather;
mod error;
mod frame_ops;
mod frames;
mod ingest;
mod temporal;

pub use crime_weather::*;
pub use error::CrimeWeatherError;

pub use config::{ConfigError, PipelineConfig};

pub use ingest::error::IngestError;
pub use ingest::loader::TableLoader;
pub use ingest::source::{SourceSchema, WeatherIndex, WEATHER_DIR};

pub use temporal::decompose::TemporalFrameExt;
pub use temporal::granularity::Granularity;
pub use temporal::layout::DateLayout;
pub use temporal::period::YearRange;

pub use category::label::CrimeType;
pub use category::normalizer::CategoryNormalizer;
pub use category::rules::{RuleGroup, RuleTable};
pub use category::words::{word_frequencies, WordCount};

pub use frame_ops::aggregate::{aggregate, Reduction};
pub use frame_ops::bucket::{Band, BandFrameExt, HumidityBand, TemperatureBand, KELVIN_OFFSET};
pub use frame_ops::error::FrameError;
pub use frame_ops::join::{left_join, merge_all};
pub use frame_ops::schema::{COUNT, CRIME_TYPE, DAY, INDEX_TYPE, INDEX_VALUE, MONTH, YEAR};

pub use frames::crime_frame::CrimeFrame;
pub use frames::pollution_frame::PollutionFrame;
pub use frames::report::{city_crime_weather, merge_city_weather, stack_city_indices};
pub use frames::weather_frame::WeatherFrame;
