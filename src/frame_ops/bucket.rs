//! Maps continuous weather readings onto ordinal bands.
//!
//! Each band type is a threshold ladder: a value belongs to the first band whose upper bound
//! it does not exceed, and to the top band once it is above every bound. Upper bounds are
//! inclusive. NaN and null inputs have no band.

use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_numeric};
use polars::prelude::{col, lit, when, DataType, Expr, LazyFrame, NULL};
use serde::Serialize;
use std::fmt;

/// Offset between Kelvin and degrees Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

pub trait Band: Copy + Sized + 'static {
    /// Inclusive upper bounds in ascending order, each with its band.
    const LADDER: &'static [(f64, Self)];
    /// The band for values above the last upper bound.
    const TOP: Self;

    fn label(self) -> &'static str;

    /// Returns `None` for NaN.
    fn from_value(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(
            Self::LADDER
                .iter()
                .find(|(upper, _)| value <= *upper)
                .map(|(_, band)| *band)
                .unwrap_or(Self::TOP),
        )
    }

    /// A string expression labelling every value of `column`.
    fn expr(column: &str) -> Expr {
        let value = col(column).cast(DataType::Float64);
        let top_bound = Self::LADDER
            .last()
            .map(|(upper, _)| *upper)
            .unwrap_or(f64::NEG_INFINITY);
        let mut expr = when(value.clone().gt(lit(top_bound)))
            .then(lit(Self::TOP.label()))
            .otherwise(lit(NULL).cast(DataType::String));
        for (upper, band) in Self::LADDER.iter().rev() {
            expr = when(value.clone().lt_eq(lit(*upper)))
                .then(lit(band.label()))
                .otherwise(expr);
        }
        // Polars orders NaN above every number, so it has to be ruled out first.
        when(value.is_nan())
            .then(lit(NULL).cast(DataType::String))
            .otherwise(expr)
    }
}

/// Relative humidity band.
///
/// Input contract: humidity as a fraction in `[0, 1]`. Percentage readings must be rescaled
/// first, e.g. with [`BandFrameExt::with_min_max_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HumidityBand {
    Low,
    Normal,
    High,
}

impl Band for HumidityBand {
    const LADDER: &'static [(f64, Self)] = &[(0.45, HumidityBand::Low), (0.65, HumidityBand::Normal)];
    const TOP: Self = HumidityBand::High;

    fn label(self) -> &'static str {
        match self {
            HumidityBand::Low => "Low",
            HumidityBand::Normal => "Normal",
            HumidityBand::High => "High",
        }
    }
}

/// Temperature band in steps of five degrees.
///
/// Input contract: degrees Celsius. Kelvin readings can be converted with
/// [`BandFrameExt::with_celsius`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemperatureBand {
    /// Up to 5 °C, including everything below freezing.
    UpTo5,
    From5To10,
    From10To15,
    From15To20,
    From20To25,
    From25To30,
    Above30,
}

impl Band for TemperatureBand {
    const LADDER: &'static [(f64, Self)] = &[
        (5.0, TemperatureBand::UpTo5),
        (10.0, TemperatureBand::From5To10),
        (15.0, TemperatureBand::From10To15),
        (20.0, TemperatureBand::From15To20),
        (25.0, TemperatureBand::From20To25),
        (30.0, TemperatureBand::From25To30),
    ];
    const TOP: Self = TemperatureBand::Above30;

    fn label(self) -> &'static str {
        match self {
            TemperatureBand::UpTo5 => "0-5",
            TemperatureBand::From5To10 => "5-10",
            TemperatureBand::From10To15 => "10-15",
            TemperatureBand::From15To20 => "15-20",
            TemperatureBand::From20To25 => "20-25",
            TemperatureBand::From25To30 => "25-30",
            TemperatureBand::Above30 => ">30",
        }
    }
}

impl fmt::Display for HumidityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub trait BandFrameExt {
    /// Adds a string column `alias` with the [`Band`] label of each value in `column`.
    ///
    /// # Errors
    /// [`FrameError::MissingColumn`] or [`FrameError::NotNumeric`] if `column` is absent or
    /// not numeric.
    fn with_band<B: Band>(self, column: &str, alias: &str) -> Result<LazyFrame, FrameError>;

    /// Replaces a Kelvin `column` with degrees Celsius.
    fn with_celsius(self, column: &str) -> LazyFrame;

    /// Rescales `column` to `[0, 1]` via `(x - min) / (max - min)` over the whole column.
    fn with_min_max_normalized(self, column: &str) -> LazyFrame;
}

impl BandFrameExt for LazyFrame {
    fn with_band<B: Band>(self, column: &str, alias: &str) -> Result<LazyFrame, FrameError> {
        let schema = frame_schema(&self)?;
        require_numeric(&schema, column)?;
        Ok(self.with_column(B::expr(column).alias(alias)))
    }

    fn with_celsius(self, column: &str) -> LazyFrame {
        self.with_column((col(column).cast(DataType::Float64) - lit(KELVIN_OFFSET)).alias(column))
    }

    fn with_min_max_normalized(self, column: &str) -> LazyFrame {
        let value = col(column).cast(DataType::Float64);
        let min = value.clone().min();
        let max = value.clone().max();
        self.with_column(((value - min.clone()) / (max - min)).alias(column))
    }
}
