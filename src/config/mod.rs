// SPDX-License-Identifier: MPL-2.0
//! Engine configuration, persisted to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use lens_develop::config::{self, Config};
//!
//! // Missing or unreadable files fall back to defaults plus a warning
//! let (mut config, warning) = config::load();
//! if let Some(message) = warning {
//!     eprintln!("{message}");
//! }
//!
//! config.history.capacity = Some(50);
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::diagnostics::BufferCapacity;
use crate::domain::editing::{DebounceDelay, ExportQuality, HistoryCapacity};
use crate::error::Result;
use crate::media::frame_export::ExportFormat;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LensDevelop";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_DEVELOP_CONFIG_DIR";

// =============================================================================
// History Section
// =============================================================================

/// Undo log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Number of snapshots kept before the oldest is evicted.
    #[serde(default = "default_history_capacity", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,

    /// Quiet period before slider edits are committed (milliseconds).
    #[serde(default = "default_debounce_ms", skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn capacity(&self) -> HistoryCapacity {
        self.capacity
            .map_or_else(HistoryCapacity::default, HistoryCapacity::new)
    }

    #[must_use]
    pub fn debounce(&self) -> DebounceDelay {
        self.debounce_ms
            .map_or_else(DebounceDelay::default, DebounceDelay::from_millis)
    }
}

// =============================================================================
// Render Section
// =============================================================================

/// Preview rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Run per-row pixel loops on the rayon thread pool.
    #[serde(default = "default_parallel", skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Delay before a coalesced render request runs (milliseconds).
    #[serde(default = "default_frame_interval_ms", skip_serializing_if = "Option::is_none")]
    pub frame_interval_ms: Option<u64>,

    /// Largest canvas width; larger sources are scaled down for display.
    #[serde(default = "default_viewport_width", skip_serializing_if = "Option::is_none")]
    pub viewport_width: Option<u32>,

    /// Largest canvas height; larger sources are scaled down for display.
    #[serde(default = "default_viewport_height", skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<u32>,

    /// Seed for film grain. Fixed so repeated renders look identical.
    #[serde(default = "default_grain_seed", skip_serializing_if = "Option::is_none")]
    pub grain_seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            frame_interval_ms: default_frame_interval_ms(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            grain_seed: default_grain_seed(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(
            self.frame_interval_ms
                .unwrap_or(DEFAULT_FRAME_INTERVAL_MS)
                .max(1),
        )
    }

    /// Returns the viewport as `(width, height)`, never below the minimum edge.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (
            self.viewport_width
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
                .max(MIN_VIEWPORT_EDGE),
            self.viewport_height
                .unwrap_or(DEFAULT_VIEWPORT_HEIGHT)
                .max(MIN_VIEWPORT_EDGE),
        )
    }

    #[must_use]
    pub fn grain_seed(&self) -> u64 {
        self.grain_seed.unwrap_or(DEFAULT_GRAIN_SEED)
    }
}

// =============================================================================
// Export Section
// =============================================================================

/// Default export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_export_format", skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,

    #[serde(default = "default_export_quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
            quality: default_export_quality(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format.unwrap_or_default()
    }

    #[must_use]
    pub fn quality(&self) -> ExportQuality {
        self.quality
            .map_or_else(ExportQuality::default, ExportQuality::new)
    }
}

// =============================================================================
// Diagnostics Section
// =============================================================================

/// Diagnostic event log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_buffer_capacity", skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        self.buffer_capacity
            .map_or_else(BufferCapacity::default, BufferCapacity::new)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Engine configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_history_capacity() -> Option<usize> {
    Some(DEFAULT_HISTORY_CAPACITY)
}

fn default_debounce_ms() -> Option<u64> {
    Some(DEFAULT_HISTORY_DEBOUNCE_MS)
}

fn default_parallel() -> Option<bool> {
    Some(true)
}

fn default_frame_interval_ms() -> Option<u64> {
    Some(DEFAULT_FRAME_INTERVAL_MS)
}

fn default_viewport_width() -> Option<u32> {
    Some(DEFAULT_VIEWPORT_WIDTH)
}

fn default_viewport_height() -> Option<u32> {
    Some(DEFAULT_VIEWPORT_HEIGHT)
}

fn default_grain_seed() -> Option<u64> {
    Some(DEFAULT_GRAIN_SEED)
}

fn default_export_format() -> Option<ExportFormat> {
    Some(ExportFormat::default())
}

fn default_export_quality() -> Option<u8> {
    Some(DEFAULT_EXPORT_QUALITY)
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory.
///
/// Resolution order: explicit override, then [`ENV_CONFIG_DIR`], then the
/// platform config directory.
fn config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning message explaining what went wrong.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("config could not be loaded, using defaults: {err}")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
