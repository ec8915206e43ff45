//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::import::DEFAULT_MAX_FILE_SIZE;

/// Directory holding a local configuration
pub const LOCAL_DIR: &str = ".cit";

/// Configuration file name, for both local and global configs
pub const CONFIG_FILE: &str = "config.yaml";

/// Every recognised configuration key
pub const KEYS: [(&str, &str); 5] = [
    ("store_url", "Base URL of the records API"),
    ("store_token", "API token sent as the xc-token header"),
    ("products_table", "Table id receiving product records"),
    ("max_file_size", "Largest accepted CSV file, in bytes"),
    ("default_format", "Default output format (auto, table, json, csv, tsv)"),
];

/// CIT configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the records API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,

    /// API token for the records API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_token: Option<String>,

    /// Table receiving product records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_table: Option<String>,

    /// Largest accepted CSV file, in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

/// Errors resolving settings required by a command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing '{key}' setting. Set it in {hint} or the {env} environment variable")]
    Missing {
        key: &'static str,
        env: &'static str,
        hint: String,
    },

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Settings needed to reach the records API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub url: String,
    pub token: String,
    pub table: String,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Load configuration, discovering the local config from `start`
    pub fn load_from(start: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/cit/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (.cit/config.yaml, nearest ancestor)
        if let Some(local_path) = Self::local_config_path(start) {
            if let Some(local) = Self::read_file(&local_path) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cit").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Find `.cit/config.yaml` by walking up from `start`
    pub fn local_config_path(start: &Path) -> Option<PathBuf> {
        let mut current = start.canonicalize().ok()?;
        loop {
            let candidate = current.join(LOCAL_DIR).join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CIT_STORE_URL") {
            self.store_url = Some(url);
        }
        if let Some(token) = lookup("CIT_DB_TOKEN") {
            self.store_token = Some(token);
        }
        if let Some(table) = lookup("CIT_PRODUCTS_TABLE") {
            self.products_table = Some(table);
        }
        if let Some(size) = lookup("CIT_MAX_FILE_SIZE") {
            match size.trim().parse() {
                Ok(bytes) => self.max_file_size = Some(bytes),
                Err(_) => tracing::warn!(value = %size, "ignoring invalid CIT_MAX_FILE_SIZE"),
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.store_url.is_some() {
            self.store_url = other.store_url;
        }
        if other.store_token.is_some() {
            self.store_token = other.store_token;
        }
        if other.products_table.is_some() {
            self.products_table = other.products_table;
        }
        if other.max_file_size.is_some() {
            self.max_file_size = other.max_file_size;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Largest accepted CSV file, in bytes
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Value of a key as text, for `cit config show`
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store_url" => self.store_url.clone(),
            "store_token" => self.store_token.as_ref().map(|_| "********".to_string()),
            "products_table" => self.products_table.clone(),
            "max_file_size" => Some(self.max_file_size().to_string()),
            "default_format" => self.default_format.clone(),
            _ => None,
        }
    }

    /// Settings required to create records remotely
    pub fn store_settings(&self) -> Result<StoreSettings, ConfigError> {
        let hint = || format!("{}/{}", LOCAL_DIR, CONFIG_FILE);
        let require = |value: &Option<String>, key: &'static str, env: &'static str| {
            value
                .clone()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::Missing {
                    key,
                    env,
                    hint: hint(),
                })
        };

        let url = require(&self.store_url, "store_url", "CIT_STORE_URL")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "store_url",
                value: url,
            });
        }

        Ok(StoreSettings {
            url,
            token: self.store_token.clone().unwrap_or_default(),
            table: require(&self.products_table, "products_table", "CIT_PRODUCTS_TABLE")?,
        })
    }
}
