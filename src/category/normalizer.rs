use crate::category::label::CrimeType;
use crate::category::rules::RuleTable;
use crate::config::ConfigError;
use crate::frame_ops::error::FrameError;
use crate::frame_ops::schema::{frame_schema, require_column, CRIME_TYPE};
use log::{debug, warn};
use polars::prelude::{col, lit, when, DataType, LazyFrame};
use regex::Regex;

/// Rewrites free-text crime descriptions into [`CrimeType`] labels.
///
/// Each rule group of a [`RuleTable`] is compiled into a single alternation. Groups are tried
/// in table order and the first one that matches decides the label, so a description that
/// mentions both `BATTERY` and `WEAPON` is an assault. Descriptions no group matches are
/// labelled [`CrimeType::Unclassified`].
pub struct CategoryNormalizer {
    groups: Vec<(CrimeType, Regex)>,
}

impl CategoryNormalizer {
    /// Compiles a rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] if a pattern is not a valid regular expression.
    pub fn new(table: &RuleTable) -> Result<Self, ConfigError> {
        let groups = table
            .groups()
            .iter()
            .filter(|group| {
                if group.patterns.is_empty() {
                    warn!("Rule group {} has no patterns and never matches", group.label);
                }
                !group.patterns.is_empty()
            })
            .map(|group| {
                let alternation = group
                    .patterns
                    .iter()
                    .map(|p| format!("(?:{p})"))
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&alternation)
                    .map(|re| (group.label, re))
                    .map_err(|source| ConfigError::InvalidRule {
                        label: group.label,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }

    /// Labels a single description.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crime_weather::{CategoryNormalizer, CrimeType};
    ///
    /// let normalizer = CategoryNormalizer::default();
    /// assert_eq!(normalizer.classify("BATTERY - SIMPLE ASSAULT"), CrimeType::Assault);
    /// assert_eq!(normalizer.classify("MOTOR VEHICLE THEFT"), CrimeType::Theft);
    /// assert_eq!(normalizer.classify("LOST PROPERTY"), CrimeType::Unclassified);
    /// ```
    pub fn classify(&self, description: &str) -> CrimeType {
        self.groups
            .iter()
            .find(|(_, re)| re.is_match(description))
            .map(|(label, _)| *label)
            .unwrap_or(CrimeType::Unclassified)
    }

    /// Adds a `type` column holding the label of each description in `column`.
    ///
    /// The rule groups become a `when/then` chain of regex matches, so the returned frame is
    /// still a lazy plan over the input. Null descriptions are labelled
    /// [`CrimeType::Unclassified`].
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingColumn`] if `column` does not exist.
    pub fn normalize(&self, frame: LazyFrame, column: &str) -> Result<LazyFrame, FrameError> {
        let schema = frame_schema(&frame)?;
        require_column(&schema, column)?;

        let description = col(column).cast(DataType::String);
        let label = self.groups.iter().rev().fold(
            lit(CrimeType::Unclassified.as_str()),
            |otherwise, (label, re)| {
                when(description.clone().str().contains(lit(re.as_str()), true))
                    .then(lit(label.as_str()))
                    .otherwise(otherwise)
            },
        );
        debug!(
            "Labelling '{}' with {} rule groups into '{}'",
            column,
            self.groups.len(),
            CRIME_TYPE
        );
        Ok(frame.with_column(label.alias(CRIME_TYPE)))
    }
}

impl Default for CategoryNormalizer {
    fn default() -> Self {
        // The built-in patterns are plain words and always compile.
        Self::new(&RuleTable::default()).unwrap_or_else(|_| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::rules::RuleGroup;
    use polars::df;
    use polars::prelude::*;

    #[test]
    fn first_matching_group_wins() {
        let normalizer = CategoryNormalizer::default();

        assert_eq!(normalizer.classify("BATTERY - SIMPLE ASSAULT"), CrimeType::Assault);
        assert_eq!(normalizer.classify("CRIM SEXUAL ASSAULT"), CrimeType::Assault);
        assert_eq!(normalizer.classify("SEX OFFENSE"), CrimeType::Offenses);
        assert_eq!(normalizer.classify("CRIMINAL DAMAGE"), CrimeType::Vandalism);
        assert_eq!(normalizer.classify("CRIMINAL TRESPASS"), CrimeType::Burglary);
        assert_eq!(normalizer.classify("ROBBERY"), CrimeType::Robbery);
        assert_eq!(normalizer.classify("IDENTITY THEFT"), CrimeType::Theft);
        assert_eq!(normalizer.classify("NARCOTICS"), CrimeType::Drug);
        assert_eq!(normalizer.classify("VIOLATION OF COURT ORDER"), CrimeType::Violation);
        assert_eq!(normalizer.classify("DECEPTIVE PRACTICE"), CrimeType::Deceptive);
        assert_eq!(normalizer.classify("HOMICIDE"), CrimeType::Homicide);
        assert_eq!(normalizer.classify("ATTEMPTED ENTRY"), CrimeType::Others);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let normalizer = CategoryNormalizer::default();

        assert_eq!(normalizer.classify("robbery"), CrimeType::Unclassified);
    }

    #[test]
    fn unmatched_text_is_unclassified_not_passed_through() {
        let normalizer = CategoryNormalizer::default();

        assert_eq!(normalizer.classify("LOST PROPERTY"), CrimeType::Unclassified);
        assert_eq!(normalizer.classify(""), CrimeType::Unclassified);
    }

    #[test]
    fn custom_tables_replace_the_defaults() -> Result<(), ConfigError> {
        let table = RuleTable::new(vec![
            RuleGroup::new(CrimeType::Robbery, &["^HOLD ?UP$"]),
            RuleGroup::new(CrimeType::Others, &[]),
        ]);

        let normalizer = CategoryNormalizer::new(&table)?;

        assert_eq!(normalizer.classify("HOLDUP"), CrimeType::Robbery);
        assert_eq!(normalizer.classify("HOLD UP"), CrimeType::Robbery);
        assert_eq!(normalizer.classify("ROBBERY"), CrimeType::Unclassified);
        Ok(())
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let table = RuleTable::new(vec![RuleGroup::new(CrimeType::Drug, &["NARCOTIC(S"])]);

        let result = CategoryNormalizer::new(&table);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRule {
                label: CrimeType::Drug,
                ..
            })
        ));
    }

    #[test]
    fn normalize_adds_a_type_column() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Primary Type" => [Some("BATTERY - SIMPLE ASSAULT"), Some("THEFT"), None, Some("LOST PROPERTY")]
        )?
        .lazy();

        let labelled = CategoryNormalizer::default()
            .normalize(frame, "Primary Type")?
            .collect()?;

        let types: Vec<Option<&str>> = labelled.column(CRIME_TYPE)?.str()?.into_iter().collect();
        assert_eq!(
            types,
            vec![
                Some("ASSAULT"),
                Some("THEFT"),
                Some("UNCLASSIFIED"),
                Some("UNCLASSIFIED")
            ]
        );
        assert_eq!(labelled.width(), 2);
        Ok(())
    }

    #[test]
    fn normalize_reports_missing_description_column() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("Description" => ["THEFT"])?.lazy();

        let result = CategoryNormalizer::default().normalize(frame, "Primary Type");

        assert!(matches!(result, Err(FrameError::MissingColumn(_))));
        Ok(())
    }

    #[test]
    fn normalize_agrees_with_classify() -> Result<(), Box<dyn std::error::Error>> {
        let descriptions = [
            "CRIM SEXUAL ASSAULT",
            "SEX OFFENSE",
            "CRIMINAL TRESPASS",
            "ATTEMPTED ENTRY",
            "robbery",
        ];
        let normalizer = CategoryNormalizer::default();
        let frame = df!("Primary Type" => descriptions)?.lazy();

        let labelled = normalizer.normalize(frame, "Primary Type")?.collect()?;

        let types: Vec<Option<&str>> = labelled.column(CRIME_TYPE)?.str()?.into_iter().collect();
        let expected: Vec<Option<&str>> = descriptions
            .iter()
            .map(|d| Some(normalizer.classify(d).as_str()))
            .collect();
        assert_eq!(types, expected);
        Ok(())
    }

    #[test]
    fn normalize_reads_nothing_until_collected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("crimes.csv");
        std::fs::write(&path, "ID,Primary Type\n1,ROBBERY\n2,THEFT\n")?;
        let frame = LazyCsvReader::new(&path).with_has_header(true).finish()?;

        let labelled = CategoryNormalizer::default().normalize(frame, "Primary Type")?;
        std::fs::remove_file(&path)?;

        assert!(labelled.collect().is_err());
        Ok(())
    }
}
