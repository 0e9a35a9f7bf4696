//! Configuration for the roster parser

use crate::error::ParserError;
use crate::offsets::AnchorTable;
use muster_domain::PageAnchor;
use serde::{Deserialize, Serialize};

/// One `[[anchors]]` entry in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// State (section) name
    pub state: String,

    /// First printed page of the anchor
    pub printed_start: u32,

    /// Source page holding `printed_start`
    pub source_start: u32,
}

impl From<&AnchorConfig> for PageAnchor {
    fn from(entry: &AnchorConfig) -> Self {
        PageAnchor::new(entry.state.clone(), entry.printed_start, entry.source_start)
    }
}

impl From<&PageAnchor> for AnchorConfig {
    fn from(anchor: &PageAnchor) -> Self {
        Self {
            state: anchor.state.clone(),
            printed_start: anchor.printed_start,
            source_start: anchor.source_start,
        }
    }
}

/// Configuration for the roster parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Verified printed→source page anchors, at most one per state
    #[serde(default = "default_anchors")]
    pub anchors: Vec<AnchorConfig>,

    /// States whose entries carry enslaver-attribution language
    #[serde(default = "default_linked_states")]
    pub linked_states: Vec<String>,

    /// Drop running headers/footers ("Virginia 509") before matching
    #[serde(default = "default_true")]
    pub strip_running_headers: bool,

    /// Merge words hyphenated across a line wrap
    #[serde(default = "default_true")]
    pub merge_hyphens: bool,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ParserError> {
        self.anchor_table().map(|_| ())?;
        if self.linked_states.iter().any(|s| s.trim().is_empty()) {
            return Err(ParserError::Config(
                "linked_states cannot contain an empty state name".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the immutable anchor table described by this configuration
    pub fn anchor_table(&self) -> Result<AnchorTable, ParserError> {
        AnchorTable::new(self.anchors.iter().map(PageAnchor::from))
    }

    /// Whether the ownership linker runs for `state`
    pub fn links_state(&self, state: &str) -> bool {
        let state = state.trim();
        self.linked_states
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(state))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ParserError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ParserError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
            linked_states: default_linked_states(),
            strip_running_headers: true,
            merge_hyphens: true,
        }
    }
}

fn default_anchors() -> Vec<AnchorConfig> {
    // Pennsylvania: header "Pennsylvania 414" sits on source page 245.
    [
        ("Maine", 9, 25),
        ("New Hampshire", 52, 68),
        ("Massachusetts", 77, 93),
        ("Pennsylvania", 414, 245),
    ]
    .into_iter()
    .map(|(state, printed_start, source_start)| AnchorConfig {
        state: state.to_string(),
        printed_start,
        source_start,
    })
    .collect()
}

fn default_linked_states() -> Vec<String> {
    vec!["Virginia".to_string()]
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.anchors.len(), 4);
    }

    #[test]
    fn test_links_state_is_case_insensitive() {
        let config = ParserConfig::default();
        assert!(config.links_state("Virginia"));
        assert!(config.links_state("  virginia "));
        assert!(!config.links_state("Maine"));
    }

    #[test]
    fn test_duplicate_anchor_rejected() {
        let mut config = ParserConfig::default();
        config.anchors.push(AnchorConfig {
            state: "pennsylvania".to_string(),
            printed_start: 1,
            source_start: 1,
        });
        assert!(matches!(config.validate(), Err(ParserError::Config(_))));
    }

    #[test]
    fn test_zero_page_anchor_rejected() {
        let mut config = ParserConfig::default();
        config.anchors.push(AnchorConfig {
            state: "Delaware".to_string(),
            printed_start: 0,
            source_start: 10,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ParserConfig::from_toml(
            r#"
            linked_states = ["Virginia", "Maryland"]

            [[anchors]]
            state = "Delaware"
            printed_start = 430
            source_start = 260
            "#,
        )
        .unwrap();

        assert_eq!(config.anchors.len(), 1);
        assert_eq!(config.anchors[0].state, "Delaware");
        assert!(config.links_state("Maryland"));
        assert!(config.strip_running_headers);
        assert!(config.merge_hyphens);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ParserConfig::from_toml("").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ParserConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ParserConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ParserConfig::from_toml("anchors = 3");
        assert!(matches!(result, Err(ParserError::Toml(_))));
    }
}
