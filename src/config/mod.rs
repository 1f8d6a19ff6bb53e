use crate::db::DEFAULT_DB_FILE;
use crate::errors::{AppError, AppResult};
use crate::models::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::utils::date::{DATE_FORMAT, is_valid_date_format};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}
fn default_date_format() -> String {
    DATE_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            low_stock_threshold: default_low_stock_threshold(),
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rinventory`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rinventory")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rinventory.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DEFAULT_DB_FILE)
    }

    /// Configured database path with `~/` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Load configuration from the standard file, or defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let cfg = Self::parse(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, when output is rendered.
    pub fn validate(&self) -> AppResult<()> {
        if !is_valid_date_format(&self.date_format) {
            return Err(AppError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Parse a YAML document; absent fields take their defaults.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Initialize the configuration file and return the resulting config.
    ///
    /// `custom_db` replaces the database path (relative names land in the
    /// config directory). In test mode nothing is written to disk and a
    /// custom path is used as given.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let database = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() || is_test {
                    p
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: database.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = Config::parse("database: /tmp/x.db\n").expect("valid yaml");
        assert_eq!(cfg.database, "/tmp/x.db");
        assert_eq!(cfg.low_stock_threshold, 5);
        assert_eq!(cfg.date_format, "%Y-%m-%d");
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::parse("").expect("empty yaml"), Config::default());
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(Config::parse("low_stock_threshold: [not a number").is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join("rinventory_cfg_roundtrip.conf");
        let _ = fs::remove_file(&path);

        let cfg = Config {
            database: "/tmp/custom.db".into(),
            low_stock_threshold: 12,
            date_format: "%d/%m/%Y".into(),
        };
        cfg.save_to(&path).expect("save config");
        assert_eq!(Config::load_from(&path).expect("load config"), cfg);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_date_format_is_a_config_error() {
        let path = std::env::temp_dir().join("rinventory_cfg_bad_format.conf");
        fs::write(&path, "date_format: \"%Q\"\n").expect("write config");

        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));

        let _ = fs::remove_file(&path);
    }
}
