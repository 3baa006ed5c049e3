use std::path::{Path, PathBuf};

use crate::core::{OrderingConfig, SessionConfig};
use crate::error::ConfigError;
use crate::types::{Symbol, ORDERING_MAX_NUMBERS};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub ordering: OrderingConfig,
    /// Write tracing output here; no subscriber is installed when unset.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.session;
        if s.moves == 0 {
            return Err(ConfigError::Validation("session.moves must be > 0".into()));
        }
        if !(2..=Symbol::COUNT).contains(&s.symbol_count) {
            return Err(ConfigError::Validation(format!(
                "session.symbol_count must be in [2, {}]",
                Symbol::COUNT
            )));
        }
        if s.max_generation_attempts == 0 {
            return Err(ConfigError::Validation(
                "session.max_generation_attempts must be > 0".into(),
            ));
        }
        if s.max_cascade_steps == 0 {
            return Err(ConfigError::Validation(
                "session.max_cascade_steps must be > 0".into(),
            ));
        }

        let o = &self.ordering;
        if o.rounds == 0 {
            return Err(ConfigError::Validation("ordering.rounds must be > 0".into()));
        }
        if !(2..=ORDERING_MAX_NUMBERS as u8).contains(&o.numbers_per_round) {
            return Err(ConfigError::Validation(format!(
                "ordering.numbers_per_round must be in [2, {ORDERING_MAX_NUMBERS}]"
            )));
        }
        if u32::from(o.numbers_per_round) > o.max_value {
            return Err(ConfigError::Validation(
                "ordering.numbers_per_round must be <= ordering.max_value".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.session.moves, 10);
        assert_eq!(config.ordering.rounds, 5);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[session]
moves = 25
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.moves, 25);
        // Other fields should be defaults
        assert_eq!(config.session.points_per_cell, 10);
        assert_eq!(config.session.symbol_count, 6);
        assert_eq!(config.ordering, OrderingConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_moves() {
        let mut config = AppConfig::default();
        config.session.moves = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_symbol_count_out_of_range() {
        let mut config = AppConfig::default();
        config.session.symbol_count = 1;
        assert!(config.validate().is_err());
        config.session.symbol_count = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_caps() {
        let mut config = AppConfig::default();
        config.session.max_cascade_steps = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.session.max_generation_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_ordering() {
        let mut config = AppConfig::default();
        config.ordering.numbers_per_round = 10;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ordering.numbers_per_round = 5;
        config.ordering.max_value = 4;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ordering.rounds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_candy_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_file = "candy.log"

[session]
moves = 3
seed = 99

[ordering]
numbers_per_round = 6
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.session.moves, 3);
        assert_eq!(config.session.seed, 99);
        assert_eq!(config.ordering.numbers_per_round, 6);
        assert_eq!(config.log_file, Some(PathBuf::from("candy.log")));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmoves = 0").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session\nmoves = ").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
