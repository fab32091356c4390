use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AggregateError, Result};

/// A named collection of source URLs whose fetched rules are merged
/// into one output artifact. Owned by configuration, read-only to the
/// pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleGroup {
    /// Used verbatim as the output artifact's base name
    pub name: String,
    pub urls: Vec<String>,
}

/// Top-level configuration: the rule groups to aggregate
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rule_groups: Vec<RuleGroup>,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Any failure here is fatal to the whole run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AggregateError::ConfigError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| AggregateError::ConfigError(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Group names become artifact base names and must be unique and
    /// non-empty.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for group in &self.rule_groups {
            if group.name.is_empty() {
                return Err(AggregateError::ConfigError(
                    "group name must not be empty".to_string(),
                ));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(AggregateError::ConfigError(format!(
                    "duplicate group name '{}'",
                    group.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config = Config::from_json(
            r#"{"rule_groups":[{"name":"ads","urls":["https://example.com/a.json"]}]}"#,
        )
        .unwrap();
        assert_eq!(config.rule_groups.len(), 1);
        assert_eq!(config.rule_groups[0].name, "ads");
        assert_eq!(config.rule_groups[0].urls.len(), 1);
    }

    #[test]
    fn test_config_rejects_duplicate_group_names() {
        let result = Config::from_json(
            r#"{"rule_groups":[{"name":"ads","urls":[]},{"name":"ads","urls":[]}]}"#,
        );
        assert!(matches!(result, Err(AggregateError::ConfigError(_))));
    }

    #[test]
    fn test_config_rejects_empty_group_name() {
        let result = Config::from_json(r#"{"rule_groups":[{"name":"","urls":[]}]}"#);
        assert!(matches!(result, Err(AggregateError::ConfigError(_))));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            Config::from_json("{"),
            Err(AggregateError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"groups":[]}"#),
            Err(AggregateError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = Config::load("/nonexistent/path/config.json");
        assert!(matches!(result, Err(AggregateError::ConfigError(_))));
    }
}
