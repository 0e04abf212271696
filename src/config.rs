//! # Generator Configuration
//!
//! Rendering options and extra chip layouts, loaded from an optional TOML file.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [render]
//! array_name = "pinStructs"
//! duplicate_policy = "keep-first"
//!
//! [[chips]]
//! name = "mega"
//! mcu = ["__AVR_ATmega1280__", "__AVR_ATmega2560__"]
//! null_pin = false
//! pins = """
//! E0
//! E1
//! """
//! ```
//!
//! - Every `[render]` key is optional and falls back to the FastGPIO names.
//! - A chip whose name matches a built-in chip replaces it.

// src/config.rs - Render options and chip layouts from TOML
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pin::DuplicatePolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderOptions,
    #[serde(default)]
    pub chips: Vec<ChipConfig>,
}

/// Names used in the generated C code and keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderOptions {
    #[serde(default = "default_array_name")]
    pub array_name: String,
    #[serde(default = "default_struct_type")]
    pub struct_type: String,
    #[serde(default = "default_pin_macro")]
    pub pin_macro: String,
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    #[serde(default = "default_keyword_tag")]
    pub keyword_tag: String,
    #[serde(default = "default_unsupported_message")]
    pub unsupported_message: String,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            array_name: default_array_name(),
            struct_type: default_struct_type(),
            pin_macro: default_pin_macro(),
            sentinel: default_sentinel(),
            keyword_tag: default_keyword_tag(),
            unsupported_message: default_unsupported_message(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("array_name", &self.array_name),
            ("struct_type", &self.struct_type),
            ("pin_macro", &self.pin_macro),
            ("sentinel", &self.sentinel),
        ] {
            if !is_c_identifier(value) {
                return Err(format!("render.{} '{}' is not a C identifier", key, value));
            }
        }
        if is_pin_name(&self.sentinel) {
            return Err(format!("render.sentinel '{}' collides with a pin name", self.sentinel));
        }
        if self.keyword_tag.is_empty() || self.keyword_tag.chars().any(char::is_whitespace) {
            return Err(format!("render.keyword_tag '{}' must be a single word", self.keyword_tag));
        }
        if self.unsupported_message.contains(['\n', '\r']) {
            return Err("render.unsupported_message must be a single line".to_string());
        }
        Ok(())
    }
}

/// `IO_<port><bit>` as generated for some pin, e.g. `IO_B0`.
fn is_pin_name(s: &str) -> bool {
    let Some(token) = s.strip_prefix("IO_") else {
        return false;
    };
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && !chars.as_str().is_empty()
        && chars.as_str().bytes().all(|b| b.is_ascii_digit())
}

/// One chip layout supplied by the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChipConfig {
    pub name: String,
    /// Preprocessor symbols that select this chip in the generated header.
    #[serde(default)]
    pub mcu: Vec<String>,
    /// The last pin is the `IO_NONE` slot.
    #[serde(default)]
    pub null_pin: bool,
    pub pins: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        self.render.validate()?;
        for chip in &self.chips {
            if chip.name.trim().is_empty() {
                return Err("chip name must not be empty".to_string());
            }
            if let Some(mcu) = chip.mcu.iter().find(|m| !is_c_identifier(m)) {
                return Err(format!("chip '{}' has invalid MCU symbol '{}'", chip.name, mcu));
            }
        }
        Ok(())
    }
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

// Default value functions
fn default_array_name() -> String { "pinStructs".to_string() }
fn default_struct_type() -> String { "IOStruct".to_string() }
fn default_pin_macro() -> String { "_FG_PIN".to_string() }
fn default_sentinel() -> String { "IO_NONE".to_string() }
fn default_keyword_tag() -> String { "LITERAL1".to_string() }
fn default_unsupported_message() -> String { "FastGPIO does not support this board.".to_string() }

/// Load and validate a configuration file from disk.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            return Err(ConfigError::Io(e));
        }
    };
    let config: Config = match toml::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to parse config TOML: {}", e);
            return Err(ConfigError::Toml(e));
        }
    };
    config.validate().map_err(ConfigError::Invalid)?;
    tracing::debug!("Loaded {} chip(s) from '{}'", config.chips.len(), path);
    Ok(config)
}
