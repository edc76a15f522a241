use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_columns};
use log::debug;
use polars::prelude::{col, Expr, JoinArgs, JoinType, LazyFrame, SortMultipleOptions};

const ROW_ORDER: &str = "__left_row";

/// Left-joins `right` onto `left` on the shared `keys`.
///
/// The result has one row per left row (more when a key tuple repeats on the right), in the
/// left frame's order. Left columns come first, followed by the right frame's non-key columns,
/// which are null where no right row matched.
///
/// # Errors
///
/// * [`FrameError::MissingColumn`] if a key is missing on either side.
/// * [`FrameError::ColumnCollision`] if a non-key column exists on both sides.
pub fn left_join(left: LazyFrame, right: LazyFrame, keys: &[&str]) -> Result<LazyFrame, FrameError> {
    let left_schema = frame_schema(&left)?;
    let right_schema = frame_schema(&right)?;
    require_columns(&left_schema, keys)?;
    require_columns(&right_schema, keys)?;

    let mut output: Vec<Expr> = left_schema.iter_names().map(|name| col(name.clone())).collect();
    for name in right_schema.iter_names() {
        if keys.contains(&name.as_str()) {
            continue;
        }
        if left_schema.contains(name) {
            return Err(FrameError::ColumnCollision {
                column: name.to_string(),
            });
        }
        output.push(col(name.clone()));
    }
    debug!("Left join on {:?}", keys);

    let on: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    Ok(left
        .with_row_index(ROW_ORDER, None)
        .join(right, on.clone(), on, JoinArgs::new(JoinType::Left))
        .sort_by_exprs(
            [col(ROW_ORDER)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .select(output))
}

/// Left-joins every frame onto the first, in order.
///
/// # Errors
///
/// [`FrameError::NothingToMerge`] for an empty list, otherwise as [`left_join`].
pub fn merge_all(frames: Vec<LazyFrame>, keys: &[&str]) -> Result<LazyFrame, FrameError> {
    let mut frames = frames.into_iter();
    let first = frames.next().ok_or(FrameError::NothingToMerge)?;
    frames.try_fold(first, |merged, next| left_join(merged, next, keys))
}
