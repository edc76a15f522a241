//! The ordered rule table that drives crime description normalization.

use crate::category::label::CrimeType;
use serde::{Deserialize, Serialize};

/// A set of alternative patterns that all rewrite to one label.
///
/// Patterns are case-sensitive regular expressions matched anywhere in the description,
/// i.e. `ASSAULT` behaves like `^.*ASSAULT.*$`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub label: CrimeType,
    pub patterns: Vec<String>,
}

impl RuleGroup {
    pub fn new(label: CrimeType, patterns: &[&str]) -> Self {
        Self {
            label,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Rule groups in priority order. The first group with a matching pattern wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    groups: Vec<RuleGroup>,
}

impl RuleTable {
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }
}

impl Default for RuleTable {
    /// Rules for Chicago and Los Angeles primary crime types.
    fn default() -> Self {
        Self::new(vec![
            RuleGroup::new(
                CrimeType::Assault,
                &["ASSAULT", "BATTERY", "INTIMIDATION", "STALKING", "KIDNAPPING", "HUMAN TRAFFICKING"],
            ),
            RuleGroup::new(
                CrimeType::Offenses,
                &[
                    "OFFENSE",
                    "PUBLIC PEACE",
                    "WEAPON",
                    "CONCEALED CARRY",
                    "INTERFERENCE WITH PUBLIC OFFICER",
                    "LIQUOR LAW",
                    "GAMBLING",
                    "PROSTITUTION",
                    "PUBLIC INDECENCY",
                    "OBSCENITY",
                ],
            ),
            RuleGroup::new(
                CrimeType::Vandalism,
                &["VANDALISM", "CRIMINAL DAMAGE", "ARSON", "GRAFFITI"],
            ),
            RuleGroup::new(CrimeType::Burglary, &["BURGLARY", "TRESPASS"]),
            RuleGroup::new(CrimeType::Robbery, &["ROBBERY"]),
            RuleGroup::new(
                CrimeType::Theft,
                &["THEFT", "STOLEN", "SHOPLIFTING", "PICKPOCKET", "PURSE SNATCHING"],
            ),
            RuleGroup::new(
                CrimeType::Drug,
                &["NARCOTIC", "DRUG", "CANNABIS", "CONTROLLED SUBSTANCE"],
            ),
            RuleGroup::new(
                CrimeType::Violation,
                &["VIOLATION", "CONTEMPT OF COURT", "RESISTING ARREST"],
            ),
            RuleGroup::new(
                CrimeType::Deceptive,
                &["DECEPTIVE", "FRAUD", "FORGERY", "COUNTERFEIT", "EMBEZZLEMENT", "BUNCO"],
            ),
            RuleGroup::new(CrimeType::Homicide, &["HOMICIDE", "MANSLAUGHTER", "MURDER"]),
            RuleGroup::new(
                CrimeType::Others,
                &[
                    "OTHER",
                    "ATTEMPT",
                    "SEX",
                    "NON-CRIMINAL",
                    "NON - CRIMINAL",
                    "CHILD",
                    "LEWD",
                    "RITUALISM",
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_follows_priority_order() {
        let labels: Vec<CrimeType> = RuleTable::default().groups().iter().map(|g| g.label).collect();
        assert_eq!(labels, CrimeType::ALL[..11].to_vec());
    }

    #[test]
    fn table_deserializes_from_a_plain_list() -> Result<(), serde_json::Error> {
        let json = r#"[
            {"label": "ROBBERY", "patterns": ["ROBBERY", "HOLDUP"]},
            {"label": "OTHERS", "patterns": ["."]}
        ]"#;

        let table: RuleTable = serde_json::from_str(json)?;

        assert_eq!(table.groups().len(), 2);
        assert_eq!(table.groups()[0], RuleGroup::new(CrimeType::Robbery, &["ROBBERY", "HOLDUP"]));
        Ok(())
    }
}
