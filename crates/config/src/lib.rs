//! Configuration management for intcode
//!
//! This crate provides functionality for managing the intcode configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use std::path::PathBuf;

use crate::error::Error;
use intcode_common::{
    constants::{CONFIG_DIR, CONFIG_FILE},
    utils::io::file::{delete_path, read_file, write_file},
};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use tracing::debug;

/// The [`Configuration`] struct represents the configuration shared by the intcode crates. All
/// drivers will attempt to read from this configuration when possible.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The maximum number of instructions a configured run may execute
    pub step_limit: Option<u64>,

    /// The maximum number of memory words an interpreter may address
    pub memory_limit: Option<usize>,

    /// The default `tracing` filter directive
    pub log_filter: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration { step_limit: None, memory_limit: None, log_filter: "info".to_string() }
    }
}

/// Returns `$HOME/.intcode/config.toml`.
#[allow(deprecated)]
fn default_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(CONFIG_DIR);
    home.push(CONFIG_FILE);
    Ok(home)
}

fn path_str(path: &PathBuf) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the configuration stored at `$HOME/.intcode/config.toml`, creating it with
    /// default values if it doesn't exist.
    pub fn load() -> Result<Self, Error> {
        let path = default_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            debug!("creating default configuration");
            Configuration::default().save()?;
        }

        Configuration::load_from(path_str(&path)?)
    }

    /// Returns the configuration stored in the TOML file at `path`. Missing keys take their
    /// default values.
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let contents = read_file(path)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Saves the current configuration to `$HOME/.intcode/config.toml`.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(path_str(&default_path()?)?)
    }

    /// Saves the current configuration as TOML at `path`.
    pub fn save_to(&self, path: &str) -> Result<(), Error> {
        write_file(
            path,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.intcode/config.toml`. Deleting a file that
    /// does not exist is not an error.
    pub fn delete() -> Result<(), Error> {
        let path = default_path()?;
        let removed = delete_path(path_str(&path)?)
            .map_err(|e| Error::Generic(format!("failed to delete config file: {e}")))?;

        if !removed {
            debug!("no configuration to delete");
        }
        Ok(())
    }

    /// Update a single key/value pair in the configuration. An empty value clears optional
    /// limits. The updated configuration is not persisted.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "step_limit" => {
                self.step_limit = parse_limit(key, value)?;
            }
            "memory_limit" => {
                self.memory_limit = parse_limit(key, value)?;
            }
            "log_filter" => {
                self.log_filter = value.to_string();
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        debug!(key, value, "updated configuration");
        Ok(())
    }
}

/// Parses an optional numeric limit, where an empty value means "no limit".
fn parse_limit<T: std::str::FromStr>(key: &str, value: &str) -> Result<Option<T>, Error> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|_| {
        Error::ParseError(format!("invalid value: \'{value}\' is not a valid number for \'{key}\'."))
    })
}

#[allow(deprecated)]
#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Test default configuration
    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.step_limit, None);
        assert_eq!(config.memory_limit, None);
        assert_eq!(config.log_filter, "info");
    }

    // Test saving and loading from an explicit path
    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.toml");
        let path = path.to_str().expect("non-utf8 path");

        let mut config = Configuration::default();
        config.update("step_limit", "1000000").expect("failed to update step_limit");
        config.update("log_filter", "intcode_vm=trace").expect("failed to update log_filter");
        config.save_to(path).expect("failed to save config file");

        let loaded = Configuration::load_from(path).expect("failed to load config file");
        assert_eq!(loaded, config);
        assert_eq!(loaded.step_limit, Some(1_000_000));
        assert_eq!(loaded.memory_limit, None);
    }

    // Test that missing keys fall back to defaults
    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.toml");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "memory_limit = 4096\n").expect("failed to write config file");

        let loaded = Configuration::load_from(path).expect("failed to load config file");
        assert_eq!(loaded.memory_limit, Some(4096));
        assert_eq!(loaded.step_limit, None);
        assert_eq!(loaded.log_filter, "info");
    }

    // Test that malformed files are reported as parse errors
    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("config.toml");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "step_limit = \"lots\"\n").expect("failed to write config file");

        assert!(matches!(Configuration::load_from(path), Err(Error::ParseError(_))));
    }

    // Test updating keys with invalid values or names
    #[test]
    fn test_update_rejects_invalid_input() {
        let mut config = Configuration::default();
        assert!(matches!(config.update("step_limit", "-5"), Err(Error::ParseError(_))));
        assert!(matches!(config.update("rpc_url", "x"), Err(Error::Generic(_))));

        config.update("memory_limit", "64").expect("failed to update memory_limit");
        assert_eq!(config.memory_limit, Some(64));
        config.update("memory_limit", "").expect("failed to clear memory_limit");
        assert_eq!(config.memory_limit, None);
    }

    // Test loading, saving, and deleting the configuration in the home directory
    #[test]
    #[serial]
    fn test_home_configuration_lifecycle() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let previous = std::env::var_os("HOME");
        std::env::set_var("HOME", dir.path());

        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config, Configuration::default());
        assert!(dir.path().join(CONFIG_DIR).join(CONFIG_FILE).exists());

        let mut config = config;
        config.update("step_limit", "10").expect("failed to update step_limit");
        config.save().expect("failed to save config file");
        assert_eq!(
            Configuration::load().expect("failed to load config file").step_limit,
            Some(10)
        );

        Configuration::delete().expect("failed to delete config file");
        assert!(!dir.path().join(CONFIG_DIR).join(CONFIG_FILE).exists());
        Configuration::delete().expect("deleting a missing config file failed");

        // the config directory is a regular file, so the config path beneath it can't be removed
        let blocker = dir.path().join("blocked");
        write_file(blocker.to_str().expect("non-utf8 path"), "").expect("failed to write file");
        std::env::set_var("HOME", &blocker);
        assert!(matches!(Configuration::delete(), Err(Error::Generic(_))));

        match previous {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
    }
}
