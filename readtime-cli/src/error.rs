use derive_more::From;
use thiserror::Error;

use crate::config::SettingsError;

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Settings(SettingsError),

    #[error("Invalid configuration: {0}")]
    Config(readtime::ConfigError),

    #[error("Failed to read '{input}': {error}")]
    #[from(skip)]
    ReadInput {
        input: String,
        error: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(std::io::Error),

    #[error("Failed to serialize estimate: {0}")]
    Json(serde_json::Error),
}
