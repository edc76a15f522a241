//! Group-and-reduce over temporal (and optionally categorical) keys.

use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{
    frame_schema, is_numeric, require_columns, require_numeric, COUNT, YEAR,
};
use crate::temporal::decompose::TemporalFrameExt;
use crate::temporal::period::YearRange;
use bon::builder;
use log::debug;
use polars::prelude::{col, len, DataType, Expr, LazyFrame, SortMultipleOptions};
use std::fmt;

/// How each group is reduced to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// Number of non-null values of the column, written to `count`.
    Count(String),
    /// Number of rows, written to `count`.
    Size,
    /// Arithmetic mean of the column, written under the column's own name.
    Mean(String),
    /// Arithmetic mean of every numeric non-key column, each under its own name.
    MeanAll,
}

impl Reduction {
    pub fn count(column: &str) -> Self {
        Reduction::Count(column.to_string())
    }

    pub fn mean(column: &str) -> Self {
        Reduction::Mean(column.to_string())
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Count(column) => write!(f, "count({column})"),
            Reduction::Size => write!(f, "size"),
            Reduction::Mean(column) => write!(f, "mean({column})"),
            Reduction::MeanAll => write!(f, "mean(*)"),
        }
    }
}

/// Groups `frame` by `keys` and reduces every group with `reduction`.
///
/// Produces one row per key tuple present in the input, sorted ascending by the keys. When
/// the frame has a `year` column, rows outside `years` (default `[2012, 2018)`) are dropped
/// before grouping. Counts are `Int64`, means `Float64`.
///
/// # Errors
///
/// Keys and the value column are checked against the frame's schema before anything runs:
/// * [`FrameError::MissingCrimeType`] if grouping by `type` before normalization.
/// * [`FrameError::MissingColumn`] for any other absent column.
/// * [`FrameError::NotNumeric`] if [`Reduction::Mean`] names a non-numeric column.
///
/// # Example
///
/// ```no_run
/// # use crime_weather::{aggregate, Reduction, YearRange};
/// # use polars::prelude::LazyFrame;
/// # fn run(crimes: LazyFrame) -> Result<(), Box<dyn std::error::Error>> {
/// let per_month = aggregate(crimes)
///     .keys(&["year", "month"])
///     .reduction(Reduction::Size)
///     .years(YearRange::new(2012, 2018))
///     .call()?
///     .collect()?;
/// # Ok(())
/// # }
/// ```
#[builder]
pub fn aggregate(
    #[builder(start_fn)] frame: LazyFrame,
    keys: &[&str],
    reduction: Reduction,
    #[builder(default)] years: YearRange,
) -> Result<LazyFrame, FrameError> {
    let schema = frame_schema(&frame)?;
    require_columns(&schema, keys)?;

    let reductions: Vec<Expr> = match &reduction {
        Reduction::Count(column) => {
            require_columns(&schema, &[column.as_str()])?;
            vec![col(column.as_str()).count().cast(DataType::Int64).alias(COUNT)]
        }
        Reduction::Size => vec![len().cast(DataType::Int64).alias(COUNT)],
        Reduction::Mean(column) => {
            require_numeric(&schema, column)?;
            vec![col(column.as_str())
                .cast(DataType::Float64)
                .mean()
                .alias(column.as_str())]
        }
        Reduction::MeanAll => schema
            .iter()
            .filter(|(name, dtype)| !keys.contains(&name.as_str()) && is_numeric(dtype))
            .map(|(name, _)| {
                col(name.clone())
                    .cast(DataType::Float64)
                    .mean()
                    .alias(name.clone())
            })
            .collect(),
    };
    debug!("Aggregating {} by {:?} within {}", reduction, keys, years);

    let frame = if schema.contains(YEAR) {
        frame.filter_years(years)
    } else {
        frame
    };
    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    Ok(frame
        .group_by(key_exprs.clone())
        .agg(reductions)
        .sort_by_exprs(key_exprs, SortMultipleOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_ops::schema::{CRIME_TYPE, MONTH};
    use polars::df;
    use polars::prelude::*;

    fn crimes() -> PolarsResult<LazyFrame> {
        Ok(df!(
            "year" => [2015i32, 2015, 2015, 2011, 2016],
            "month" => [12i32, 12, 12, 5, 1],
            "Date" => [Some("12/24/2015"), Some("12/25/2015"), None, Some("05/01/2011"), Some("01/09/2016")],
            "type" => ["THEFT", "ROBBERY", "THEFT", "THEFT", "THEFT"]
        )?
        .lazy())
    }

    #[test]
    fn size_counts_rows_per_key() -> Result<(), Box<dyn std::error::Error>> {
        let counts = aggregate(crimes()?)
            .keys(&["year", "month"])
            .reduction(Reduction::Size)
            .call()?
            .collect()?;

        assert_eq!(counts.height(), 2);
        let years: Vec<Option<i32>> = counts.column(YEAR)?.i32()?.into_iter().collect();
        assert_eq!(years, vec![Some(2015), Some(2016)]);
        let count: Vec<Option<i64>> = counts.column(COUNT)?.i64()?.into_iter().collect();
        assert_eq!(count, vec![Some(3), Some(1)]);
        Ok(())
    }

    #[test]
    fn count_skips_nulls() -> Result<(), Box<dyn std::error::Error>> {
        let counts = aggregate(crimes()?)
            .keys(&["year", "month"])
            .reduction(Reduction::count("Date"))
            .call()?
            .collect()?;

        assert_eq!(counts.column(COUNT)?.i64()?.get(0), Some(2));
        Ok(())
    }

    #[test]
    fn categorical_keys_are_grouped_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let counts = aggregate(crimes()?)
            .keys(&["year", "month", "type"])
            .reduction(Reduction::Size)
            .call()?
            .collect()?;

        let types: Vec<Option<&str>> = counts.column(CRIME_TYPE)?.str()?.into_iter().collect();
        assert_eq!(types, vec![Some("ROBBERY"), Some("THEFT"), Some("THEFT")]);
        let count: Vec<Option<i64>> = counts.column(COUNT)?.i64()?.into_iter().collect();
        assert_eq!(count, vec![Some(1), Some(2), Some(1)]);
        Ok(())
    }

    #[test]
    fn output_respects_the_year_window() -> Result<(), Box<dyn std::error::Error>> {
        let counts = aggregate(crimes()?)
            .keys(&["year"])
            .reduction(Reduction::Size)
            .years(YearRange::new(2010, 2016))
            .call()?
            .collect()?;

        let years: Vec<Option<i32>> = counts.column(YEAR)?.i32()?.into_iter().collect();
        assert_eq!(years, vec![Some(2011), Some(2015)]);
        for year in years.into_iter().flatten() {
            assert!(YearRange::new(2010, 2016).contains(year));
        }
        Ok(())
    }

    #[test]
    fn mean_reduces_one_column() -> Result<(), Box<dyn std::error::Error>> {
        let weather = df!(
            "year" => [2013i32, 2013, 2013],
            "month" => [1i32, 1, 2],
            "Chicago" => [270.0f64, 280.0, 275.5]
        )?
        .lazy();

        let means = aggregate(weather)
            .keys(&["year", "month"])
            .reduction(Reduction::mean("Chicago"))
            .call()?
            .collect()?;

        let values: Vec<Option<f64>> = means.column("Chicago")?.f64()?.into_iter().collect();
        assert_eq!(values, vec![Some(275.0), Some(275.5)]);
        Ok(())
    }

    #[test]
    fn mean_all_skips_keys_and_text() -> Result<(), Box<dyn std::error::Error>> {
        let pollution = df!(
            "year" => [2014i32, 2014],
            "month" => [3i32, 3],
            "City" => ["Chicago", "Chicago"],
            "NO2 Mean" => [10.0f64, 20.0],
            "CO AQI" => [4i64, 6]
        )?
        .lazy();

        let means = aggregate(pollution)
            .keys(&["year", "month"])
            .reduction(Reduction::MeanAll)
            .call()?
            .collect()?;

        assert_eq!(means.width(), 4);
        assert!(means.column("City").is_err());
        assert_eq!(means.column("NO2 Mean")?.f64()?.get(0), Some(15.0));
        assert_eq!(means.column("CO AQI")?.f64()?.get(0), Some(5.0));
        Ok(())
    }

    #[test]
    fn regrouping_an_expanded_aggregate_is_stable() -> Result<(), Box<dyn std::error::Error>> {
        let first = aggregate(crimes()?)
            .keys(&["year", "month"])
            .reduction(Reduction::Size)
            .call()?
            .collect()?;

        // Re-expand: one row per counted observation.
        let mut years = Vec::new();
        let mut months = Vec::new();
        let year_col = first.column(YEAR)?.i32()?;
        let month_col = first.column(MONTH)?.i32()?;
        let count_col = first.column(COUNT)?.i64()?;
        for i in 0..first.height() {
            for _ in 0..count_col.get(i).unwrap_or(0) {
                years.push(year_col.get(i));
                months.push(month_col.get(i));
            }
        }
        let expanded = DataFrame::new(vec![
            Column::new(YEAR.into(), years),
            Column::new(MONTH.into(), months),
        ])?;

        let second = aggregate(expanded.lazy())
            .keys(&["year", "month"])
            .reduction(Reduction::Size)
            .call()?
            .collect()?;

        assert!(first.equals(&second));
        Ok(())
    }

    #[test]
    fn grouping_by_type_requires_normalization() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("year" => [2015i32], "month" => [12i32])?.lazy();

        let result = aggregate(frame)
            .keys(&["year", "month", "type"])
            .reduction(Reduction::Size)
            .call();

        assert!(matches!(result, Err(FrameError::MissingCrimeType(_))));
        Ok(())
    }

    #[test]
    fn mean_of_text_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("year" => [2015i32], "City" => ["Chicago"])?.lazy();

        let result = aggregate(frame)
            .keys(&["year"])
            .reduction(Reduction::mean("City"))
            .call();

        assert!(matches!(result, Err(FrameError::NotNumeric { .. })));
        Ok(())
    }
}
