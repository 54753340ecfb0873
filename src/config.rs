// ⚙️ Configuration
// Every field has a default; a JSON file only needs the keys it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Separator placed between item body paragraphs
pub const DEFAULT_PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Delimiter that joins form options in a single cell
pub const DEFAULT_OPTIONS_DELIMITER: &str = ";";

/// What the pipeline does when something goes wrong for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Record it and move on to the next node
    Skip,
    /// Stop processing the locale
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paragraph_separator: String,
    pub options_delimiter: String,
    /// A merge call returned an error
    pub on_error: Policy,
    /// No content was found for a schema node
    pub on_missing_resource: Policy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paragraph_separator: DEFAULT_PARAGRAPH_SEPARATOR.to_string(),
            options_delimiter: DEFAULT_OPTIONS_DELIMITER.to_string(),
            on_error: Policy::Abort,
            on_missing_resource: Policy::Skip,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Builder: set the error policy
    pub fn with_on_error(mut self, policy: Policy) -> Self {
        self.on_error = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paragraph_separator, "\n\n");
        assert_eq!(config.options_delimiter, ";");
        assert_eq!(config.on_error, Policy::Abort);
        assert_eq!(config.on_missing_resource, Policy::Skip);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"options_delimiter": "|", "on_error": "skip"}}"#).unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.options_delimiter, "|");
        assert_eq!(config.on_error, Policy::Skip);
        assert_eq!(config.paragraph_separator, DEFAULT_PARAGRAPH_SEPARATOR);
    }

    #[test]
    fn test_bad_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::from_path(file.path()).is_err());
    }
}
