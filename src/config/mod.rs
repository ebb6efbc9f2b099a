// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language
//! - `[zoom]` - Zoom step and ceiling
//! - `[gestures]` - Swipe and dismiss thresholds
//! - `[transitions]` - Transition fallback delay
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `LENS_LIGHTBOX_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_lightbox::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.zoom.step = Some(0.5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::newtypes::{FallbackDelay, SwipeThresholds, ZoomCeiling, ZoomStep};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "LensLightbox";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_LIGHTBOX_CONFIG_DIR";

/// Warning key returned by [`load`] when an existing file cannot be parsed.
pub const CONFIG_LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoomConfig {
    /// Zoom increment for zoom in/out (0.25 = 25 percentage points).
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub step: Option<f32>,

    /// Lowest maximum zoom for any image.
    #[serde(
        default = "default_zoom_ceiling",
        skip_serializing_if = "Option::is_none"
    )]
    pub ceiling: Option<f32>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: default_zoom_step(),
            ceiling: default_zoom_ceiling(),
        }
    }
}

/// Touch gesture thresholds, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    /// Horizontal travel a navigation swipe must exceed.
    #[serde(
        default = "default_swipe_min_distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_min_distance: Option<f32>,

    /// Vertical travel a navigation swipe must stay below.
    #[serde(
        default = "default_swipe_max_vertical",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_max_vertical: Option<f32>,

    /// Upward travel the dismiss flick must exceed.
    #[serde(
        default = "default_dismiss_min_distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_min_distance: Option<f32>,

    /// Horizontal travel the dismiss flick must stay below.
    #[serde(
        default = "default_dismiss_max_horizontal",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_max_horizontal: Option<f32>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_min_distance: default_swipe_min_distance(),
            swipe_max_vertical: default_swipe_max_vertical(),
            dismiss_min_distance: default_dismiss_min_distance(),
            dismiss_max_horizontal: default_dismiss_max_horizontal(),
        }
    }
}

/// Transition timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitionConfig {
    /// Fallback delay (ms) used when a transition-end signal never arrives.
    #[serde(
        default = "default_transition_fallback_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub fallback_ms: Option<u32>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fallback_ms: default_transition_fallback_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Viewer configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Zoom settings.
    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Gesture thresholds.
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Transition timing.
    #[serde(default)]
    pub transitions: TransitionConfig,
}

/// Validated settings consumed by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerSettings {
    pub zoom_step: ZoomStep,
    pub zoom_ceiling: ZoomCeiling,
    pub swipe: SwipeThresholds,
    pub transition_fallback: FallbackDelay,
}

impl Config {
    /// Resolves optional fields against defaults and validates them.
    #[must_use]
    pub fn viewer_settings(&self) -> ViewerSettings {
        let gestures = &self.gestures;
        ViewerSettings {
            zoom_step: ZoomStep::new(self.zoom.step.unwrap_or(DEFAULT_ZOOM_STEP)),
            zoom_ceiling: ZoomCeiling::new(self.zoom.ceiling.unwrap_or(DEFAULT_ZOOM_CEILING)),
            swipe: SwipeThresholds::new(
                gestures
                    .swipe_min_distance
                    .unwrap_or(DEFAULT_SWIPE_MIN_DISTANCE),
                gestures
                    .swipe_max_vertical
                    .unwrap_or(DEFAULT_SWIPE_MAX_VERTICAL),
                gestures
                    .dismiss_min_distance
                    .unwrap_or(DEFAULT_DISMISS_MIN_DISTANCE),
                gestures
                    .dismiss_max_horizontal
                    .unwrap_or(DEFAULT_DISMISS_MAX_HORIZONTAL),
            ),
            transition_fallback: FallbackDelay::from_millis(
                self.transitions
                    .fallback_ms
                    .unwrap_or(DEFAULT_TRANSITION_FALLBACK_MS),
            ),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP)
}

fn default_zoom_ceiling() -> Option<f32> {
    Some(DEFAULT_ZOOM_CEILING)
}

fn default_swipe_min_distance() -> Option<f32> {
    Some(DEFAULT_SWIPE_MIN_DISTANCE)
}

fn default_swipe_max_vertical() -> Option<f32> {
    Some(DEFAULT_SWIPE_MAX_VERTICAL)
}

fn default_dismiss_min_distance() -> Option<f32> {
    Some(DEFAULT_DISMISS_MIN_DISTANCE)
}

fn default_dismiss_max_horizontal() -> Option<f32> {
    Some(DEFAULT_DISMISS_MAX_HORIZONTAL)
}

fn default_transition_fallback_ms() -> Option<u32> {
    Some(DEFAULT_TRANSITION_FALLBACK_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring an explicit override first and the
/// environment variable second.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config, using defaults");
                    return (Config::default(), Some(CONFIG_LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
