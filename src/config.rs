//! # Emulator Configuration
//!
//! Board, serial and sketch settings loaded from TOML. Every section is
//! optional and falls back to the defaults of the blink sketch.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [serial]
//! baud = 115200
//!
//! [registry]
//! strict_writes = true
//!
//! [sketch]
//! kind = "ranging"
//! trigger_pin = 12
//! echo_pin = 13
//! interval_ms = 250
//! iterations = 20
//!
//! [[pins]]
//! id = 7
//! mode = "input_pullup"
//!
//! [[pins]]
//! id = 8
//! mode = 1
//! ```
//!
//! - `mode` takes a name (`input`, `output`, `input_pullup`) or a raw code.
//!   Raw codes are not checked here; an unknown code fails when the board
//!   applies its pin configuration.
//! - `iterations` absent means the sketch runs until stopped.

// src/config.rs - Single configuration file
use crate::hardware::PinMode;
use crate::sketch::blink::{DEFAULT_BLINK_INTERVAL_MS, DEFAULT_BLINK_PIN};
use crate::sketch::ranging::{DEFAULT_BAUD, DEFAULT_ECHO_PIN, DEFAULT_TRIGGER_PIN};
use crate::sketch::{Blink, Ranging, Sketch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown pin mode name '{name}' for pin {pin}")]
    UnknownModeName { pin: i32, name: String },
    #[error("invalid sketch settings: {0}")]
    InvalidSketch(String),
}

/// Main configuration struct for the emulated board and the sketch it runs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub sketch: SketchConfig,
    #[serde(default)]
    pub pins: Vec<PinConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerialConfig {
    #[serde(default = "default_baud")]
    pub baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baud: default_baud() }
    }
}

/// Pin registry behaviour.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Keep the recorded level of non-output pins unchanged on digital writes.
    #[serde(default)]
    pub strict_writes: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SketchKind {
    #[default]
    Blink,
    Ranging,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SketchConfig {
    #[serde(default)]
    pub kind: SketchKind,
    #[serde(default = "default_blink_pin")]
    pub pin: i32,
    /// Loop delay; defaults depend on the sketch kind.
    #[serde(default)]
    pub interval_ms: Option<u64>,
    #[serde(default = "default_trigger_pin")]
    pub trigger_pin: i32,
    #[serde(default = "default_echo_pin")]
    pub echo_pin: i32,
    #[serde(default)]
    pub iterations: Option<u64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            kind: SketchKind::default(),
            pin: default_blink_pin(),
            interval_ms: None,
            trigger_pin: default_trigger_pin(),
            echo_pin: default_echo_pin(),
            iterations: None,
        }
    }
}

impl SketchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kind == SketchKind::Ranging && self.trigger_pin == self.echo_pin {
            return Err(ConfigError::InvalidSketch(format!(
                "trigger_pin and echo_pin must differ (both {})",
                self.trigger_pin
            )));
        }
        Ok(())
    }

    /// Build the configured sketch.
    pub fn build(&self, baud: u32) -> Result<Box<dyn Sketch>, ConfigError> {
        self.validate()?;
        let sketch: Box<dyn Sketch> = match self.kind {
            SketchKind::Blink => Box::new(Blink::new(
                self.pin,
                self.interval_ms.unwrap_or(DEFAULT_BLINK_INTERVAL_MS),
            )),
            SketchKind::Ranging => {
                let defaults = Ranging::default();
                Box::new(Ranging::new(
                    self.trigger_pin,
                    self.echo_pin,
                    self.interval_ms.unwrap_or(defaults.interval_ms),
                    baud,
                ))
            }
        };
        Ok(sketch)
    }
}

/// Mode given either by name or by raw firmware code.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ModeSetting {
    Code(i32),
    Name(String),
}

/// Extra pin registered before the sketch's own setup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PinConfig {
    pub id: i32,
    pub mode: ModeSetting,
}

impl PinConfig {
    /// Raw mode code for the registry. Names must be known; codes pass
    /// through unchecked.
    pub fn mode_code(&self) -> Result<i32, ConfigError> {
        match &self.mode {
            ModeSetting::Code(code) => Ok(*code),
            ModeSetting::Name(name) => PinMode::from_name(name)
                .map(PinMode::code)
                .ok_or_else(|| ConfigError::UnknownModeName {
                    pin: self.id,
                    name: name.clone(),
                }),
        }
    }
}

// Default value functions
fn default_baud() -> u32 { DEFAULT_BAUD }
fn default_blink_pin() -> i32 { DEFAULT_BLINK_PIN }
fn default_trigger_pin() -> i32 { DEFAULT_TRIGGER_PIN }
fn default_echo_pin() -> i32 { DEFAULT_ECHO_PIN }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}
