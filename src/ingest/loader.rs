use crate::ingest::error::IngestError;
use log::info;
use polars::prelude::{LazyCsvReader, LazyFileListReader, LazyFrame};
use std::io;
use std::path::{Path, PathBuf};

/// Rows read to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Reads CSV files below a data directory into lazy frames.
pub struct TableLoader {
    data_dir: PathBuf,
}

impl TableLoader {
    pub fn new(data_dir: &Path) -> TableLoader {
        TableLoader {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scans a CSV file with a header row. `relative_path` is resolved against the data
    /// directory. Nothing is read until the returned frame is collected.
    pub fn read_csv(&self, relative_path: impl AsRef<Path>) -> Result<LazyFrame, IngestError> {
        let path = self.data_dir.join(relative_path);
        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(IngestError::MissingFile(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(IngestError::MissingFile(path))
            }
            Err(e) => return Err(IngestError::Metadata(path, e)),
        }

        info!("Scanning {}", path.display());
        LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()
            .map_err(|e| IngestError::CsvScan(path, e))
    }
}
