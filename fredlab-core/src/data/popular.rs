//! Curated popular-indicator list.
//!
//! Eight fixed id/label pairs offered as one-keystroke selections in both
//! front-ends. Loadable from a TOML file for people who want their own
//! set, with the built-in US list as the default.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularIndicator {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularList {
    pub indicators: Vec<PopularIndicator>,
}

impl PopularList {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read popular list: {e}"))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse popular list TOML: {e}"))
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopularIndicator> {
        self.indicators.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PopularIndicator> {
        self.indicators.get(index)
    }

    /// The built-in US indicator set.
    pub fn default_us() -> Self {
        let entries = [
            ("UNRATE", "Unemployment Rate (USA)"),
            ("GDPC1", "GDP Growth Rate (USA)"),
            ("CPIAUCSL", "Inflation Rate (USA)"),
            ("FEDFUNDS", "Interest Rate (USA)"),
            ("INDPRO", "Industrial Production"),
            ("RSXFS", "Retail Sales"),
            ("HOUST", "Housing Starts"),
            ("PSAVERT", "Personal Savings Rate"),
        ];

        Self {
            indicators: entries
                .into_iter()
                .map(|(id, label)| PopularIndicator {
                    id: id.into(),
                    label: label.into(),
                })
                .collect(),
        }
    }
}

impl Default for PopularList {
    fn default() -> Self {
        Self::default_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_has_eight_entries() {
        let list = PopularList::default_us();
        assert_eq!(list.len(), 8);
        assert_eq!(list.get(0).unwrap().id, "UNRATE");
        assert_eq!(list.get(7).unwrap().id, "PSAVERT");
    }

    #[test]
    fn toml_round_trip() {
        let toml_str = r#"
[[indicators]]
id = "UNRATE"
label = "Unemployment Rate (USA)"

[[indicators]]
id = "GDPC1"
label = "GDP Growth Rate (USA)"
"#;
        let list = PopularList::from_toml(toml_str).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().id, "GDPC1");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(PopularList::from_toml("indicators = 3").is_err());
    }
}
