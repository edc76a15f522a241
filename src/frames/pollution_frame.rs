//! Contains the `PollutionFrame` structure for lazy operations on air quality measurements.

use crate::frame_ops::aggregate::{aggregate, Reduction};
use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_column};
use crate::ingest::source::SourceSchema;
use crate::temporal::decompose::TemporalFrameExt;
use crate::temporal::granularity::Granularity;
use crate::temporal::period::YearRange;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` of pollution measurements (NO2, O3, SO2, CO and
/// their AQI values), one row per site and day.
#[derive(Clone)]
pub struct PollutionFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
    schema: SourceSchema,
}

impl PollutionFrame {
    pub fn new(frame: LazyFrame, schema: SourceSchema) -> Self {
        Self { frame, schema }
    }

    pub fn filter(&self, predicate: Expr) -> PollutionFrame {
        PollutionFrame::new(self.frame.clone().filter(predicate), self.schema.clone())
    }

    /// Monthly means of every numeric measurement for sites whose `city_column` contains
    /// `city`.
    ///
    /// Matching is a case-sensitive substring test, so `"Los Angeles"` also selects
    /// `"East Los Angeles"`.
    pub fn city_monthly_means(
        &self,
        city_column: &str,
        city: &str,
        years: YearRange,
    ) -> Result<LazyFrame, FrameError> {
        let schema = frame_schema(&self.frame)?;
        require_column(&schema, city_column)?;

        let frame = self
            .frame
            .clone()
            .with_date_parts(&self.schema.date_column, &self.schema.layout, Granularity::Month)?
            .filter(
                col(city_column)
                    .cast(DataType::String)
                    .str()
                    .contains_literal(lit(city)),
            );
        aggregate(frame)
            .keys(Granularity::Month.keys())
            .reduction(Reduction::MeanAll)
            .years(years)
            .call()
    }
}
