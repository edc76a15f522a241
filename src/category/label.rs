//! Defines the `CrimeType` enum, the closed vocabulary free-text crime descriptions are
//! normalized into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coarse crime category.
///
/// Produced by [`crate::CategoryNormalizer`] from the open-vocabulary description column of a
/// crime table. Every description maps to exactly one variant; text that none of the rule
/// groups recognise becomes [`CrimeType::Unclassified`] rather than being passed through, so
/// grouping by category never mixes raw text with canonical labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeType {
    /// Assault, battery, intimidation, stalking, kidnapping.
    Assault,
    /// Public order offenses: weapons, liquor law, gambling, prostitution.
    Offenses,
    /// Criminal damage, arson, graffiti.
    Vandalism,
    /// Burglary and trespass.
    Burglary,
    Robbery,
    /// Theft of any kind, including motor vehicles.
    Theft,
    /// Narcotics and controlled substances.
    Drug,
    /// Violations of orders, permits and court rulings.
    Violation,
    /// Fraud, forgery, counterfeiting, embezzlement.
    Deceptive,
    Homicide,
    /// The explicit catch-all group (descriptions mentioning `OTHER`, `ATTEMPT`, `SEX`, ...).
    Others,
    /// No rule group matched, or the description was missing.
    Unclassified,
}

impl CrimeType {
    /// Every label, in rule priority order, with `Unclassified` last.
    pub const ALL: [CrimeType; 12] = [
        CrimeType::Assault,
        CrimeType::Offenses,
        CrimeType::Vandalism,
        CrimeType::Burglary,
        CrimeType::Robbery,
        CrimeType::Theft,
        CrimeType::Drug,
        CrimeType::Violation,
        CrimeType::Deceptive,
        CrimeType::Homicide,
        CrimeType::Others,
        CrimeType::Unclassified,
    ];

    /// The label written into the `type` column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crime_weather::CrimeType;
    ///
    /// assert_eq!(CrimeType::Assault.as_str(), "ASSAULT");
    /// assert_eq!(CrimeType::Unclassified.to_string(), "UNCLASSIFIED");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            CrimeType::Assault => "ASSAULT",
            CrimeType::Offenses => "OFFENSES",
            CrimeType::Vandalism => "VANDALISM",
            CrimeType::Burglary => "BURGLARY",
            CrimeType::Robbery => "ROBBERY",
            CrimeType::Theft => "THEFT",
            CrimeType::Drug => "DRUG",
            CrimeType::Violation => "VIOLATION",
            CrimeType::Deceptive => "DECEPTIVE",
            CrimeType::Homicide => "HOMICIDE",
            CrimeType::Others => "OTHERS",
            CrimeType::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Parses a label as written by [`CrimeType::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        CrimeType::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl fmt::Display for CrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
