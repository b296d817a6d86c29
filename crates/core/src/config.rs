//! TOML configuration: store location, exclusions, logging.

use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use serde::Deserialize;
use shellexpand::full;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("failed to expand path '{0}': {1}")]
    Expand(String, #[source] shellexpand::LookupError<std::env::VarError>),
}

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Where imported notes are committed. Defaults to the XDG data dir.
    pub store_path: Option<String>,
    /// Folders to skip when scanning an import root (relative to it).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub store_path: PathBuf,
    pub excluded_folders: Vec<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            excluded_folders: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicitly passed path must exist; a missing file at the default
    /// location just means defaults.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let (path, explicit) = match config_path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Ok(ResolvedConfig::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Self::resolve(&cf)
    }

    fn resolve(cf: &ConfigFile) -> Result<ResolvedConfig, ConfigError> {
        let store_path = match &cf.store_path {
            Some(p) => expand_path(p)?,
            None => default_store_path(),
        };

        let logging = if let Some(ref file) = cf.logging.file {
            LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            cf.logging.clone()
        };

        Ok(ResolvedConfig {
            store_path,
            excluded_folders: cf.excluded_folders.iter().map(PathBuf::from).collect(),
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("noteport").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("noteport").join("config.toml")
}

pub fn default_store_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        return Path::new(&xdg).join("noteport").join("store.json");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".local").join("share").join("noteport").join("store.json")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|e| ConfigError::Expand(input.to_string(), e))?;
    Ok(PathBuf::from(expanded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
version = 1
store_path = "/tmp/noteport-test/store.json"
excluded_folders = ["archive", "templates"]

[logging]
level = "debug"
"#,
        );

        let cfg = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/noteport-test/store.json"));
        assert_eq!(
            cfg.excluded_folders,
            [PathBuf::from("archive"), PathBuf::from("templates")]
        );
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let result = ConfigLoader::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let cfg = ConfigLoader::load(Some(&path)).unwrap();
        assert!(cfg.excluded_folders.is_empty());
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.store_path.ends_with("noteport/store.json"));
    }

    #[test]
    fn rejects_unsupported_version() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "version = 2\n");

        let result = ConfigLoader::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::BadVersion(2))));
    }

    #[test]
    fn undefined_variable_in_path_is_an_expand_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "store_path = \"$NOTEPORT_TEST_UNSET_VAR/store.json\"\n",
        );

        let result = ConfigLoader::load(Some(&path));
        match result {
            Err(ConfigError::Expand(input, _)) => {
                assert!(input.contains("NOTEPORT_TEST_UNSET_VAR"));
            }
            other => panic!("expected expand error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "store_path = [not toml");

        let result = ConfigLoader::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError(_, _))));
    }
}
