//! Typed configuration for the server binary.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file) under the `DECISION_SCALE` prefix, with `__` between
//! section and key.
//!
//! # Example
//!
//! ```no_run
//! use decision_scale::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! println!("listening on {}", config.server.port);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod editor;
mod error;
mod server;
mod storage;

pub use editor::EditorConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "DECISION_SCALE";
const ENV_SEPARATOR: &str = "__";

/// Everything the binary reads at startup.
///
/// Sections left out of the environment fall back to their defaults, so
/// an empty environment yields an in-memory server on port 5000.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub editor: EditorConfig,
}

impl AppConfig {
    /// Reads `.env` (if any), then `DECISION_SCALE__<SECTION>__<KEY>`
    /// variables, e.g. `DECISION_SCALE__STORAGE__BACKEND=postgres`.
    ///
    /// Only type errors fail here; range checks live in [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::DotEnv(err.to_string()));
            }
        }

        let source = config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR);
        let app = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.editor.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
