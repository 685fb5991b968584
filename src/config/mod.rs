//! Configuration management for MPC Studio Bridge
//!
//! Handles loading, parsing, and validation of the JSON (or YAML) configuration
//! file. The configuration is read once at startup and never changes afterwards.

pub mod color;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::mpc::lights::{BicolorLed, MonoLed};
use crate::mpc::{PadColor, PAD_COUNT};

pub use color::{parse_hex_color, ColorError};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub midi: MidiConfig,
    #[serde(default)]
    pub pads: PadsConfig,
    #[serde(default)]
    pub full_level: FullLevelConfig,
    #[serde(default)]
    pub startup: StartupConfig,
}

/// MIDI port configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MidiConfig {
    /// Name of the device port (exact or substring match)
    #[serde(default = "default_device_port")]
    pub device_port: String,
    /// Name of the virtual port exposed to the host
    #[serde(default = "default_virtual_port")]
    pub virtual_port: String,
    /// MIDI client name
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

/// Pad LED colors, as `"RRGGBB"` strings
#[derive(Debug, Clone, Deserialize)]
pub struct PadsConfig {
    /// Resting color per pad index (16 entries)
    #[serde(default = "default_pad_colors")]
    pub colors: Vec<String>,
    /// Color shown while a pad is held
    #[serde(default = "default_active_color")]
    pub active_color: String,
}

/// Full level toggle button
#[derive(Debug, Clone, Deserialize)]
pub struct FullLevelConfig {
    #[serde(default = "default_full_level_button")]
    pub button: u8,
    #[serde(default)]
    pub led: ButtonLedKind,
}

/// LED hardware behind a button
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLedKind {
    #[default]
    Mono,
    Bicolor,
}

impl ButtonLedKind {
    /// LED value shown while full level is off
    pub fn disabled_code(self) -> u8 {
        match self {
            ButtonLedKind::Mono => MonoLed::Dim.into(),
            ButtonLedKind::Bicolor => BicolorLed::Dim1.into(),
        }
    }

    /// LED value shown while full level is on
    pub fn enabled_code(self) -> u8 {
        match self {
            ButtonLedKind::Mono => MonoLed::On.into(),
            ButtonLedKind::Bicolor => BicolorLed::On1.into(),
        }
    }

    pub fn off_code(self) -> u8 {
        match self {
            ButtonLedKind::Mono => MonoLed::Off.into(),
            ButtonLedKind::Bicolor => BicolorLed::Off.into(),
        }
    }
}

/// Startup behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct StartupConfig {
    #[serde(default = "default_true")]
    pub animation: bool,
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

/// Decoded pad colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadPalette {
    pub resting: [PadColor; PAD_COUNT],
    pub active: PadColor,
}

impl AppConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config = Self::parse(&contents, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse config: {}", path))?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without validating it
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(contents).context("Invalid JSON")?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents).context("Invalid YAML")?,
        };
        Ok(config)
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.midi.device_port.trim().is_empty() {
            anyhow::bail!("midi.device_port cannot be empty");
        }
        if self.midi.virtual_port.trim().is_empty() {
            anyhow::bail!("midi.virtual_port cannot be empty");
        }
        if self.midi.client_name.trim().is_empty() {
            anyhow::bail!("midi.client_name cannot be empty");
        }

        if self.full_level.button > 127 {
            anyhow::bail!(
                "full_level.button {} is invalid (must be 0-127)",
                self.full_level.button
            );
        }

        self.palette()?;

        Ok(())
    }

    /// Decode the configured pad colors
    pub fn palette(&self) -> Result<PadPalette> {
        if self.pads.colors.len() != PAD_COUNT {
            anyhow::bail!(
                "pads.colors must have exactly {} entries, found {}",
                PAD_COUNT,
                self.pads.colors.len()
            );
        }

        let mut resting = [PadColor::OFF; PAD_COUNT];
        for (idx, (slot, value)) in resting.iter_mut().zip(&self.pads.colors).enumerate() {
            *slot = parse_hex_color(value)
                .with_context(|| format!("Invalid color for pad {}", idx))?;
        }

        let active = parse_hex_color(&self.pads.active_color)
            .context("Invalid pads.active_color")?;

        Ok(PadPalette { resting, active })
    }
}

/// On-disk configuration syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// YAML for `.yaml`/`.yml` files, JSON otherwise
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            device_port: default_device_port(),
            virtual_port: default_virtual_port(),
            client_name: default_client_name(),
        }
    }
}

impl Default for PadsConfig {
    fn default() -> Self {
        Self {
            colors: default_pad_colors(),
            active_color: default_active_color(),
        }
    }
}

impl Default for FullLevelConfig {
    fn default() -> Self {
        Self {
            button: default_full_level_button(),
            led: ButtonLedKind::default(),
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            animation: default_true(),
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

// Default value functions
fn default_device_port() -> String { "MPC Studio MPC Public".to_string() }
fn default_virtual_port() -> String { "My Studio".to_string() }
fn default_client_name() -> String { "MPC Studio Bridge".to_string() }
fn default_pad_colors() -> Vec<String> { vec!["1F003F".to_string(); PAD_COUNT] }
fn default_active_color() -> String { "7F7F7F".to_string() }
fn default_full_level_button() -> u8 { 39 }
fn default_true() -> bool { true }
fn default_step_delay_ms() -> u64 { 3 }
