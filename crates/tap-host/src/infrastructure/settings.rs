//! TOML-backed gesture timing and screen scale settings.
//!
//! The host reads an optional `tap-host.toml` next to its working directory:
//!
//! ```toml
//! [gestures]
//! long_press_ms = 500
//! hold_threshold_ms = 300
//! wheel_duration_ms = 50
//! key_tap_up_delay_ms = 10
//! wheel_step = 120.0
//!
//! [screen]
//! scale = 1.0
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]`, so a partial file,
//! an empty file and a missing file all produce a working configuration.
//! That matters on first run and when upgrading past a version that added
//! new fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tap_core::domain::transform::ScreenScale;
use thiserror::Error;

use crate::application::gestures::GestureTiming;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured screen scale is unusable.
    #[error("screen scale must be a positive finite number, got {0}")]
    InvalidScale(f32),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level host settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjectorSettings {
    #[serde(default)]
    pub gestures: GestureSettings,
    #[serde(default)]
    pub screen: ScreenSettings,
}

/// Durations and distances for synthesized gestures, in file-friendly units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureSettings {
    /// How long a synthesized long-press stays down, in milliseconds.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    /// Hold time separating the dual-action button's two meanings, in
    /// milliseconds.
    #[serde(default = "default_hold_threshold_ms")]
    pub hold_threshold_ms: u64,
    /// Time between the down and move steps of a wheel swipe, in
    /// milliseconds.
    #[serde(default = "default_wheel_duration_ms")]
    pub wheel_duration_ms: u64,
    /// Gap between the halves of a synthesized key tap, in milliseconds.
    #[serde(default = "default_key_tap_up_delay_ms")]
    pub key_tap_up_delay_ms: u64,
    /// Vertical distance one wheel notch drags the contact, in scaled
    /// pixels.
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f32,
}

/// Coordinate mapping between the remote view and this screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenSettings {
    /// Factor applied to incoming remote coordinates.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_long_press_ms() -> u64 {
    500
}
fn default_hold_threshold_ms() -> u64 {
    300
}
fn default_wheel_duration_ms() -> u64 {
    50
}
fn default_key_tap_up_delay_ms() -> u64 {
    10
}
fn default_wheel_step() -> f32 {
    120.0
}
fn default_scale() -> f32 {
    1.0
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self {
            gestures: GestureSettings::default(),
            screen: ScreenSettings::default(),
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            long_press_ms: default_long_press_ms(),
            hold_threshold_ms: default_hold_threshold_ms(),
            wheel_duration_ms: default_wheel_duration_ms(),
            key_tap_up_delay_ms: default_key_tap_up_delay_ms(),
            wheel_step: default_wheel_step(),
        }
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl InjectorSettings {
    /// Loads settings from `path`, returning defaults if the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] for file-system errors other than "not
    /// found", [`SettingsError::Parse`] for malformed TOML and
    /// [`SettingsError::InvalidScale`] for an unusable scale value.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses and validates settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] or [`SettingsError::InvalidScale`].
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        if !(settings.screen.scale.is_finite() && settings.screen.scale > 0.0) {
            return Err(SettingsError::InvalidScale(settings.screen.scale));
        }
        Ok(settings)
    }

    /// The gesture timing these settings describe.
    pub fn gesture_timing(&self) -> GestureTiming {
        GestureTiming {
            long_press_duration: Duration::from_millis(self.gestures.long_press_ms),
            hold_threshold: Duration::from_millis(self.gestures.hold_threshold_ms),
            wheel_duration: Duration::from_millis(self.gestures.wheel_duration_ms),
            key_tap_up_delay: Duration::from_millis(self.gestures.key_tap_up_delay_ms),
            wheel_step: self.gestures.wheel_step,
        }
    }

    /// A fresh scale handle seeded with the configured factor.
    pub fn screen_scale(&self) -> ScreenScale {
        ScreenScale::new(self.screen.scale)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
