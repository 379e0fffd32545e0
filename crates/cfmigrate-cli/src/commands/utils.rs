use anyhow::{Context, Result};
use cfmigrate_core::config::{LogFormat, MigrateConfig};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Settings file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cfmigrate.toml";

/// Loads settings from `explicit`, or from `./cfmigrate.toml` if it exists,
/// or falls back to the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<MigrateConfig> {
    if let Some(path) = explicit {
        return MigrateConfig::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }

    let implicit = Path::new(DEFAULT_CONFIG_FILE);
    if implicit.exists() {
        return MigrateConfig::load(implicit)
            .with_context(|| format!("Failed to load settings from {}", DEFAULT_CONFIG_FILE));
    }

    Ok(MigrateConfig::default())
}

/// Installs the global subscriber. Logs always go to stderr so that stdout
/// only carries the migrated text.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &MigrateConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logging is already initialized: {}", e);
    }
}

/// Reads a style file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_explicit_config_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_preset = \"mozilla\"").unwrap();
        writeln!(file, "log_format = \"json\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.default_preset, "mozilla");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "ColumnLimit: 100\n").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "ColumnLimit: 100\n");
    }
}
