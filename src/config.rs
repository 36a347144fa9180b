//! Configuration handling for promptgen.
//! Settings come from an optional promptgen.json / promptgen.yml / promptgen.yaml;
//! value maps can be loaded from JSON or YAML files in the same way.

use crate::constants::{CONFIG_FILES, DEFAULT_DRAFT_FILE, DEFAULT_STORE_FILE, SEPARATOR};
use crate::error::{PromptgenError, PromptgenResult};
use crate::placeholder::ValueMap;
use chrono::TimeDelta;
use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub debounce_ms: u64,
    /// Templates shorter than this many characters are not auto-saved
    pub min_content_length: usize,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 2000,
            min_content_length: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub enabled: bool,
    pub debounce_ms: u64,
    /// Drafts older than this are not restored
    pub max_age_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 1000,
            max_age_hours: 24,
        }
    }
}

impl SessionConfig {
    pub fn max_age(&self) -> TimeDelta {
        TimeDelta::try_hours(self.max_age_hours).unwrap_or(TimeDelta::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_path: PathBuf,
    pub draft_path: PathBuf,
    /// Refuse multi-value expansions producing more prompts than this
    pub max_combinations: Option<usize>,
    pub autosave: AutoSaveConfig,
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            draft_path: PathBuf::from(DEFAULT_DRAFT_FILE),
            max_combinations: None,
            autosave: AutoSaveConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Parses JSON first and falls back to YAML.
fn parse_document<T: DeserializeOwned>(content: &str) -> PromptgenResult<T> {
    match serde_json::from_str(content) {
        Ok(v) => Ok(v),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| PromptgenError::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Parses configuration content.
///
/// # Errors
/// * `PromptgenError::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> PromptgenResult<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    parse_document(content)
}

/// Loads configuration from `dir`, trying each supported file name in order.
/// Returns the defaults when none exists.
///
/// # Arguments
/// * `dir` - Directory to look in, usually the working directory
pub fn load_config<P: AsRef<Path>>(dir: P) -> PromptgenResult<Config> {
    for file in CONFIG_FILES {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            return load_config_file(&config_path);
        }
    }
    debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
    Ok(Config::default())
}

/// Loads configuration from an explicit file.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> PromptgenResult<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Converts one entry of a value file into a raw value string.
/// Arrays become comma-separated alternatives, so their items may not contain a comma.
fn value_to_string(name: &str, value: serde_json::Value) -> PromptgenResult<String> {
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
                    PromptgenError::ConfigError(format!("value '{name}' has a nested list or object")),
                ),
                other => {
                    let item = value_to_string(name, other)?;
                    if item.contains(SEPARATOR) {
                        return Err(PromptgenError::ConfigError(format!(
                            "value '{name}' has a list item containing '{SEPARATOR}': '{item}'"
                        )));
                    }
                    Ok(item)
                }
            })
            .collect::<PromptgenResult<Vec<_>>>()
            .map(|items| items.join(", ")),
        serde_json::Value::Object(_) => Err(PromptgenError::ConfigError(format!(
            "value '{name}' must be a string, number, boolean or list"
        ))),
    }
}

/// Parses a value map from JSON or YAML content.
pub fn parse_values(content: &str) -> PromptgenResult<ValueMap> {
    if content.trim().is_empty() {
        return Ok(ValueMap::new());
    }
    let raw: IndexMap<String, serde_json::Value> = parse_document(content)?;
    raw.into_iter()
        .map(|(name, value)| {
            let value = value_to_string(&name, value)?;
            Ok((name, value))
        })
        .collect()
}

/// Loads a value map from a JSON or YAML file.
///
/// # Errors
/// * `PromptgenError::ConfigError` for nested objects, nested lists, or list
///   items containing the separator
pub fn load_values<P: AsRef<Path>>(path: P) -> PromptgenResult<ValueMap> {
    let path = path.as_ref();
    debug!("Loading values from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_values(&content)
}
