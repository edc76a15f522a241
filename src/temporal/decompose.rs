use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_column, DAY, MONTH, YEAR};
use crate::temporal::granularity::Granularity;
use crate::temporal::layout::DateLayout;
use crate::temporal::period::YearRange;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, StrptimeOptions, TimeUnit};

pub trait TemporalFrameExt {
    /// Adds Int32 `year` and `month` columns, plus `day` at [`Granularity::Day`],
    /// derived from `column` according to `layout`.
    ///
    /// # Arguments
    /// * `column`: The column holding the date.
    /// * `layout`: How that column encodes its dates.
    /// * `granularity`: Which key columns to derive.
    ///
    /// # Returns
    /// A new `LazyFrame` with the key columns appended (or replaced, if they already existed).
    ///
    /// # Errors
    /// [`FrameError::MissingColumn`] if `column` is not in the frame. Values that do not match
    /// the layout fail strictly when the frame is collected.
    fn with_date_parts(
        self,
        column: &str,
        layout: &DateLayout,
        granularity: Granularity,
    ) -> Result<LazyFrame, FrameError>;

    /// Keeps rows with `years.start <= year < years.end`.
    /// Assumes a `year` column exists.
    fn filter_years(self, years: YearRange) -> LazyFrame;
}

impl TemporalFrameExt for LazyFrame {
    fn with_date_parts(
        self,
        column: &str,
        layout: &DateLayout,
        granularity: Granularity,
    ) -> Result<LazyFrame, FrameError> {
        let schema = frame_schema(&self)?;
        let dtype = require_column(&schema, column)?;

        let [year, month, day] = match layout {
            DateLayout::MonthDayYear => {
                let text = col(column).cast(DataType::String);
                let part = |offset: i64, length: u64| {
                    text.clone()
                        .str()
                        .slice(lit(offset), lit(length))
                        .strict_cast(DataType::Int32)
                };
                [part(6, 4), part(0, 2), part(3, 2)]
            }
            DateLayout::Parsed { format } => {
                let stamp = match dtype {
                    DataType::Date | DataType::Datetime(_, _) => col(column),
                    _ => col(column).str().to_datetime(
                        Some(TimeUnit::Milliseconds),
                        None,
                        StrptimeOptions {
                            format: Some(format.as_str().into()),
                            strict: true,
                            exact: true,
                            ..Default::default()
                        },
                        lit("raise"),
                    ),
                };
                [
                    stamp.clone().dt().year(),
                    stamp.clone().dt().month(),
                    stamp.dt().day(),
                ]
            }
        };

        let mut parts: Vec<Expr> = vec![
            year.cast(DataType::Int32).alias(YEAR),
            month.cast(DataType::Int32).alias(MONTH),
        ];
        if granularity == Granularity::Day {
            parts.push(day.cast(DataType::Int32).alias(DAY));
        }
        Ok(self.with_columns(parts))
    }

    fn filter_years(self, years: YearRange) -> LazyFrame {
        self.filter(
            col(YEAR)
                .gt_eq(lit(years.start))
                .and(col(YEAR).lt(lit(years.end))),
        )
    }
}
