//! Editor configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::DebounceConfig;

/// Editing-session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Quiescence window before an edit is written, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl EditorConfig {
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig::default().with_window(Duration::from_millis(self.debounce_ms))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.debounce_ms == 0 {
            return Err(ValidationError::InvalidDebounce);
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1000
}
