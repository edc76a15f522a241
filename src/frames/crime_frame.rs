//! Contains the `CrimeFrame` structure for lazy operations on a city's crime reports.

use crate::category::normalizer::CategoryNormalizer;
use crate::frame_ops::aggregate::{aggregate, Reduction};
use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::CRIME_TYPE;
use crate::ingest::source::SourceSchema;
use crate::temporal::decompose::TemporalFrameExt;
use crate::temporal::granularity::Granularity;
use crate::temporal::period::YearRange;
use polars::prelude::{Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` of crime reports, one row per reported incident.
///
/// Instances are typically obtained via [`crate::CrimeWeather::crime`].
#[derive(Clone)]
pub struct CrimeFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
    schema: SourceSchema,
}

impl CrimeFrame {
    pub fn new(frame: LazyFrame, schema: SourceSchema) -> Self {
        Self { frame, schema }
    }

    pub fn filter(&self, predicate: Expr) -> CrimeFrame {
        CrimeFrame::new(self.frame.clone().filter(predicate), self.schema.clone())
    }

    /// Labels every report with a [`crate::CrimeType`] in a new `type` column.
    pub fn with_crime_type(
        &self,
        normalizer: &CategoryNormalizer,
        description_column: &str,
    ) -> Result<CrimeFrame, FrameError> {
        let frame = normalizer.normalize(self.frame.clone(), description_column)?;
        Ok(CrimeFrame::new(frame, self.schema.clone()))
    }

    /// Number of reports with a date, per temporal key, in a `count` column.
    pub fn counts(&self, granularity: Granularity, years: YearRange) -> Result<LazyFrame, FrameError> {
        aggregate(self.dated(granularity)?)
            .keys(granularity.keys())
            .reduction(Reduction::count(&self.schema.date_column))
            .years(years)
            .call()
    }

    /// Number of reports per temporal key and crime type.
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingCrimeType`] unless [`CrimeFrame::with_crime_type`] ran first.
    pub fn counts_by_type(
        &self,
        granularity: Granularity,
        years: YearRange,
    ) -> Result<LazyFrame, FrameError> {
        let mut keys = granularity.keys().to_vec();
        keys.push(CRIME_TYPE);
        aggregate(self.dated(granularity)?)
            .keys(&keys)
            .reduction(Reduction::Size)
            .years(years)
            .call()
    }

    fn dated(&self, granularity: Granularity) -> Result<LazyFrame, FrameError> {
        self.frame
            .clone()
            .with_date_parts(&self.schema.date_column, &self.schema.layout, granularity)
    }
}
