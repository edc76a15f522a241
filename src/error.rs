use crate::config::ConfigError;
use crate::frame_ops::error::FrameError;
use crate::ingest::error::IngestError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrimeWeatherError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Failed to collect frame: {0}")]
    Polars(#[from] PolarsError),
}
