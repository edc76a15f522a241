//! Contains the `WeatherFrame` structure for lazy operations on a per-city weather variable.

use crate::frame_ops::aggregate::{aggregate, Reduction};
use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_numeric};
use crate::ingest::source::{SourceSchema, WeatherIndex};
use crate::temporal::decompose::TemporalFrameExt;
use crate::temporal::granularity::Granularity;
use crate::temporal::period::YearRange;
use polars::prelude::{col, DataType, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding one weather variable for many cities.
///
/// The underlying frame is "wide": a date column (see [`SourceSchema::weather`]) followed by
/// one numeric column per city, e.g. `datetime, Vancouver, Portland, ..., Chicago`.
///
/// Instances are typically obtained via [`crate::CrimeWeather::weather`].
#[derive(Clone)]
pub struct WeatherFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
    index: WeatherIndex,
    schema: SourceSchema,
}

impl WeatherFrame {
    pub fn new(frame: LazyFrame, index: WeatherIndex, schema: SourceSchema) -> Self {
        Self {
            frame,
            index,
            schema,
        }
    }

    pub fn index(&self) -> WeatherIndex {
        self.index
    }

    /// Filters the weather data based on a Polars predicate expression.
    ///
    /// Returns a *new* `WeatherFrame`; the original is unchanged.
    pub fn filter(&self, predicate: Expr) -> WeatherFrame {
        WeatherFrame::new(
            self.frame.clone().filter(predicate),
            self.index,
            self.schema.clone(),
        )
    }

    /// The mean of `city`'s readings per temporal key, inside `years`.
    ///
    /// The result has the key columns of `granularity` and one Float64 column named after the
    /// weather index (e.g. `Temperature`), sorted by key.
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingColumn`] if the city or date column is absent,
    /// [`FrameError::NotNumeric`] if the city column holds text.
    pub fn city_series(
        &self,
        city: &str,
        granularity: Granularity,
        years: YearRange,
    ) -> Result<LazyFrame, FrameError> {
        let schema = frame_schema(&self.frame)?;
        require_numeric(&schema, city)?;

        let keys = granularity.keys();
        let label = self.index.label();
        let mut selection: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
        selection.push(col(city).cast(DataType::Float64).alias(label));

        let selected = self
            .frame
            .clone()
            .with_date_parts(&self.schema.date_column, &self.schema.layout, granularity)?
            .select(selection);
        aggregate(selected)
            .keys(keys)
            .reduction(Reduction::mean(label))
            .years(years)
            .call()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_ops::schema::{DAY, YEAR};
    use polars::df;
    use polars::prelude::*;

    fn temperature() -> PolarsResult<WeatherFrame> {
        let frame = df!(
            "datetime" => [
                "2011-12-31 23:00:00",
                "2012-01-01 00:00:00",
                "2012-01-01 01:00:00",
                "2012-01-02 00:00:00",
                "2012-02-01 00:00:00"
            ],
            "Chicago" => [260.0f64, 270.0, 272.0, 275.0, 280.0],
            "Portland" => [280.0f64, 281.0, 282.0, 283.0, 284.0]
        )?
        .lazy();
        Ok(WeatherFrame::new(frame, WeatherIndex::Temperature, SourceSchema::weather()))
    }

    #[test]
    fn daily_city_series_averages_hours() -> Result<(), Box<dyn std::error::Error>> {
        let series = temperature()?
            .city_series("Chicago", Granularity::Day, YearRange::default())?
            .collect()?;

        assert_eq!(series.get_column_names_str(), vec!["year", "month", "day", "Temperature"]);
        let days: Vec<Option<i32>> = series.column(DAY)?.i32()?.into_iter().collect();
        assert_eq!(days, vec![Some(1), Some(2), Some(1)]);
        let values: Vec<Option<f64>> = series.column("Temperature")?.f64()?.into_iter().collect();
        assert_eq!(values, vec![Some(271.0), Some(275.0), Some(280.0)]);
        Ok(())
    }

    #[test]
    fn monthly_city_series_drops_other_years() -> Result<(), Box<dyn std::error::Error>> {
        let series = temperature()?
            .city_series("Portland", Granularity::Month, YearRange::default())?
            .collect()?;

        assert_eq!(series.height(), 2);
        let years: Vec<Option<i32>> = series.column(YEAR)?.i32()?.into_iter().collect();
        assert_eq!(years, vec![Some(2012), Some(2012)]);
        assert_eq!(series.column("Temperature")?.f64()?.get(0), Some(282.0));
        Ok(())
    }

    #[test]
    fn unknown_cities_are_reported() -> Result<(), Box<dyn std::error::Error>> {
        let result = temperature()?.city_series("Gotham", Granularity::Day, YearRange::default());

        assert!(matches!(result, Err(FrameError::MissingColumn(ref c)) if c == "Gotham"));
        Ok(())
    }

    #[test]
    fn filter_returns_a_new_frame() -> Result<(), Box<dyn std::error::Error>> {
        let weather = temperature()?;

        let cold = weather.filter(col("Chicago").lt(lit(271.0)));

        assert_eq!(cold.frame.collect()?.height(), 2);
        assert_eq!(weather.frame.collect()?.height(), 5);
        Ok(())
    }
}
