use crate::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// User settings for the `cfmigrate` tool, read from `cfmigrate.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MigrateConfig {
    /// Preset used when the document does not name one
    pub default_preset: String,
    pub skip_defaulted_fields: bool,
    /// `tracing` filter directive, e.g. `warn` or `cfmigrate=debug`
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            default_preset: "llvm".to_string(),
            skip_defaulted_fields: false,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl MigrateConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MigrationError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MigrateConfig::from_toml_str("").unwrap();
        assert_eq!(config, MigrateConfig::default());
        assert_eq!(config.default_preset, "llvm");
    }

    #[test]
    fn test_partial_document() {
        let config = MigrateConfig::from_toml_str(
            "default_preset = \"Google\"\nlog_format = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.default_preset, "Google");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.skip_defaulted_fields);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skip_defaulted_fields = true").unwrap();

        let config = MigrateConfig::load(file.path()).unwrap();
        assert!(config.skip_defaulted_fields);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = MigrateConfig::load(Path::new("/nonexistent/cfmigrate.toml")).unwrap_err();
        assert!(matches!(err, MigrationError::Config(_)));
    }
}
