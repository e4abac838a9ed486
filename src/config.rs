//! Session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CascadeResult, ValidationError};

/// How the user points at things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Mouse: hover shows tooltips, click applies drugs.
    #[default]
    Pointer,
    /// Touch: tap toggles tooltips, long-press shows drug info.
    Touch,
}

/// Interaction timing for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Input model.
    pub input_mode: InputMode,
    /// Grace delay before a hover-leave hide commits. Pointer mode only;
    /// touch mode never hovers, and the touch default just bounds
    /// `forced_hide_delay_ms`.
    pub hide_delay_ms: u64,
    /// Delay before a forced close commits (0 = immediately).
    pub forced_hide_delay_ms: u64,
    /// Hold time after which a press on a drug control counts as a long-press.
    pub long_press_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_mode(InputMode::Pointer)
    }
}

impl SessionConfig {
    /// Default timings for `mode`.
    #[must_use]
    pub const fn for_mode(mode: InputMode) -> Self {
        match mode {
            InputMode::Pointer => Self {
                input_mode: mode,
                hide_delay_ms: 200,
                forced_hide_delay_ms: 50,
                long_press_ms: 500,
            },
            InputMode::Touch => Self {
                input_mode: mode,
                hide_delay_ms: 1500,
                forced_hide_delay_ms: 0,
                long_press_ms: 500,
            },
        }
    }

    /// Validate timings.
    ///
    /// `CascadeSession::new` calls this before building a session.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hide_delay_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "hide_delay_ms must be > 0".to_string(),
            });
        }
        if self.long_press_ms == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "long_press_ms must be > 0".to_string(),
            });
        }
        if self.forced_hide_delay_ms > self.hide_delay_ms {
            return Err(ValidationError::InvalidConfig {
                reason: "forced_hide_delay_ms must not exceed hide_delay_ms".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error.
    pub fn from_json(json: &str) -> CascadeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse or validation error.
    pub fn from_path(path: &Path) -> CascadeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
