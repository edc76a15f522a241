//! Combines per-source frames into the city-level comparison tables.

use crate::frame_ops::error::FrameError;
use crate::frame_ops::join::{left_join, merge_all};
use crate::frame_ops::schema::{INDEX_TYPE, INDEX_VALUE};
use crate::frames::weather_frame::WeatherFrame;
use crate::temporal::decompose::TemporalFrameExt;
use crate::temporal::granularity::Granularity;
use crate::temporal::period::YearRange;
use log::info;
use polars::prelude::{col, concat, lit, Expr, LazyFrame, UnionArgs};

/// One column per weather index for `city`, merged on the temporal key.
///
/// The first index decides which key tuples appear; later indices are left-joined onto it.
pub fn merge_city_weather(
    weather: &[WeatherFrame],
    city: &str,
    granularity: Granularity,
    years: YearRange,
) -> Result<LazyFrame, FrameError> {
    let series = weather
        .iter()
        .map(|frame| frame.city_series(city, granularity, years))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Merging {} weather indices for {}", series.len(), city);
    merge_all(series, granularity.keys())
}

/// The weather indices for `city` stacked into long format.
///
/// Columns: the temporal key, `indexvalue` (Float64) and `indextype` (the index label), with
/// all rows of the first index before those of the next.
pub fn stack_city_indices(
    weather: &[WeatherFrame],
    city: &str,
    granularity: Granularity,
    years: YearRange,
) -> Result<LazyFrame, FrameError> {
    let keys = granularity.keys();
    let stacked = weather
        .iter()
        .map(|frame| {
            let label = frame.index().label();
            let mut selection: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
            selection.push(col(label).alias(INDEX_VALUE));
            selection.push(lit(label).alias(INDEX_TYPE));
            Ok(frame.city_series(city, granularity, years)?.select(selection))
        })
        .collect::<Result<Vec<_>, FrameError>>()?;
    if stacked.is_empty() {
        return Err(FrameError::NothingToMerge);
    }
    Ok(concat(stacked, UnionArgs::default())?)
}

/// Weather readings for a city next to the number of crimes in the same period.
///
/// `weather` is a stacked table from [`stack_city_indices`] and `crime_counts` the output of
/// [`crate::CrimeFrame::counts`] at the same granularity. Every weather row is kept; periods
/// without reported crimes have a null `count`.
pub fn city_crime_weather(
    weather: LazyFrame,
    crime_counts: LazyFrame,
    granularity: Granularity,
    years: YearRange,
) -> Result<LazyFrame, FrameError> {
    Ok(left_join(weather, crime_counts, granularity.keys())?.filter_years(years))
}
