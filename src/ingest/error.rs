use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Input file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("Failed to read metadata for input file '{0}'")]
    Metadata(PathBuf, #[source] std::io::Error),

    #[error("Failed to scan CSV file '{0}'")]
    CsvScan(PathBuf, #[source] PolarsError),
}
