//! Host-provided editor settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ZOOM_STEP;
use crate::select::SelectionMode;

/// Error returned by [`Settings::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings document is not valid JSON for [`Settings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// The zoom step must be finite and greater than 1.
    #[error("invalid zoom step: {0}")]
    InvalidZoomStep(f64),
}

/// Switches the host can flip at any time; read on every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ignore middle-button panning.
    pub disable_panning: bool,
    /// Ignore marquee creation on pointer-down.
    pub disable_box_selection: bool,
    /// Which marquee policy to run.
    pub selection_mode: SelectionMode,
    /// Scale multiplier per wheel notch.
    pub zoom_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            disable_panning: false,
            disable_box_selection: false,
            selection_mode: SelectionMode::default(),
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

impl Settings {
    /// Parse settings from the host's JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidZoomStep`] for a zoom step that is not finite or not above 1.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoomStep`] when the zoom step would not zoom.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        Ok(())
    }
}
