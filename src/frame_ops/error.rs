use polars::error::PolarsError;
use polars::prelude::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Required column '{0}' not found in frame")]
    MissingColumn(String),

    // The `type` column only exists once descriptions have been normalized.
    #[error("Column '{0}' not found in frame; normalize crime descriptions before grouping by crime type")]
    MissingCrimeType(String),

    #[error("Column '{column}' exists on both sides of the join and is not a join key")]
    ColumnCollision { column: String },

    #[error("Cannot merge an empty list of frames")]
    NothingToMerge,

    #[error("Column '{column}' has type {dtype}, expected a numeric column")]
    NotNumeric { column: String, dtype: DataType },

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
