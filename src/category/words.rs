use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_column};
use polars::prelude::{col, DataType, LazyFrame};
use std::collections::HashMap;

/// How often a whitespace-separated token occurs in a text column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counts whitespace-separated tokens across every non-null cell of `column`.
///
/// Results are ordered by descending count, ties by token. Useful for deciding which
/// descriptions a rule table is still missing.
///
/// # Errors
///
/// [`FrameError::MissingColumn`] if the column does not exist.
pub fn word_frequencies(frame: LazyFrame, column: &str) -> Result<Vec<WordCount>, FrameError> {
    let schema = frame_schema(&frame)?;
    require_column(&schema, column)?;

    let df = frame
        .select([col(column).cast(DataType::String)])
        .collect()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for text in df.column(column)?.str()?.into_iter().flatten() {
        for word in text.split_whitespace() {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::*;

    #[test]
    fn repeated_tokens_are_counted() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("type" => ["ROBBERY", "ROBBERY"])?.lazy();

        let words = word_frequencies(frame, "type")?;

        assert_eq!(
            words,
            vec![WordCount {
                word: "ROBBERY".to_string(),
                count: 2
            }]
        );
        Ok(())
    }

    #[test]
    fn tokens_are_split_and_ordered() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Primary Type" => [Some("MOTOR VEHICLE THEFT"), Some("THEFT"), None, Some("ARSON")]
        )?
        .lazy();

        let words = word_frequencies(frame, "Primary Type")?;

        let flat: Vec<(&str, usize)> = words.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(
            flat,
            vec![("THEFT", 2), ("ARSON", 1), ("MOTOR", 1), ("VEHICLE", 1)]
        );
        Ok(())
    }
}
