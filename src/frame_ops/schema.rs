//! Column names shared across stages and small schema checks.

use crate::frame_ops::error::FrameError;
use polars::prelude::{DataType, LazyFrame, Schema, SchemaRef};

pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
/// Added by the category normalizer.
pub const CRIME_TYPE: &str = "type";
pub const COUNT: &str = "count";
pub const INDEX_VALUE: &str = "indexvalue";
pub const INDEX_TYPE: &str = "indextype";

/// Resolves the output schema of a lazy plan without executing it.
pub(crate) fn frame_schema(frame: &LazyFrame) -> Result<SchemaRef, FrameError> {
    Ok(frame.clone().collect_schema()?)
}

pub(crate) fn require_column<'a>(schema: &'a Schema, column: &str) -> Result<&'a DataType, FrameError> {
    schema.get(column).ok_or_else(|| {
        if column == CRIME_TYPE {
            FrameError::MissingCrimeType(column.to_string())
        } else {
            FrameError::MissingColumn(column.to_string())
        }
    })
}

pub(crate) fn require_columns(schema: &Schema, columns: &[&str]) -> Result<(), FrameError> {
    for column in columns {
        require_column(schema, column)?;
    }
    Ok(())
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric()
}

pub(crate) fn require_numeric(schema: &Schema, column: &str) -> Result<(), FrameError> {
    let dtype = require_column(schema, column)?;
    if is_numeric(dtype) {
        Ok(())
    } else {
        Err(FrameError::NotNumeric {
            column: column.to_string(),
            dtype: dtype.clone(),
        })
    }
}
