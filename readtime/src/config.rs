//! # Configuration Module - Estimation Settings
//!
//! This module provides the settings that control how an [`Estimator`](crate::Estimator)
//! charges time for the different kinds of content it finds.
//!
//! ## Usage
//!
//! ```rust
//! use readtime::config::{Configuration, CustomComponent};
//!
//! // Use default configuration
//! let config = Configuration::default();
//!
//! // Custom configuration
//! let config = Configuration {
//!     words_per_minute: 250.0,
//!     custom_components: vec![CustomComponent::new("Quiz", 3.0)],
//!     ..Configuration::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Deserialization
//!
//! Every field is optional when deserializing. Missing fields receive the defaults
//! listed below and unknown fields are ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Minutes;

/// Reading speed used when none is configured
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 200.0;
/// Time charged per line of code when none is configured
pub const DEFAULT_CODE_TIME_PER_LINE: Minutes = 2.0;
/// Time charged per image when none is configured
pub const DEFAULT_IMAGE_TIME: Minutes = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Words per minute must be a positive number, got {0}")]
    InvalidWordsPerMinute(f64),

    #[error("Code time per line must be zero or a positive number, got {0}")]
    InvalidCodeTimePerLine(Minutes),

    #[error("Image time must be zero or a positive number, got {0}")]
    InvalidImageTime(Minutes),

    #[error("Custom components must have a name")]
    EmptyComponentName,

    #[error("Custom component '{name}' has an invalid time: {time}")]
    InvalidComponentTime { name: String, time: Minutes },

    #[error("Custom component '{name}' can't be used as a tag pattern: {source}")]
    ComponentPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// An embedded component that is charged a flat amount of time per occurrence
///
/// Occurrences are opening tags like `<Name/>`, `<Name>` or `<Name attr="v">`.
/// Closing tags are never counted.
///
/// The name is used verbatim in a pattern. Names containing regex metacharacters
/// match whatever that pattern matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomComponent {
    /// Tag name, as written after the `<`
    pub name: String,
    /// Minutes charged for every opening tag
    pub time: Minutes,
}

impl CustomComponent {
    pub fn new(name: impl Into<String>, time: Minutes) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }
}

/// Settings for reading time estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Reading speed for prose
    ///
    /// **Default**: 200 words per minute
    pub words_per_minute: f64,

    /// Minutes charged for each non-empty line inside a fenced code block
    ///
    /// Replaces the word-based time of the block.
    ///
    /// **Default**: 2 minutes
    pub code_time_per_line: Minutes,

    /// Minutes charged for each Markdown image
    ///
    /// Replaces the word-based time of the image reference.
    ///
    /// **Default**: 2 minutes
    pub image_time: Minutes,

    /// Components charged a flat time per occurrence
    ///
    /// **Default**: none
    pub custom_components: Vec<CustomComponent>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            code_time_per_line: DEFAULT_CODE_TIME_PER_LINE,
            image_time: DEFAULT_IMAGE_TIME,
            custom_components: Vec::new(),
        }
    }
}

impl Configuration {
    /// Checks that every setting is usable for estimation
    ///
    /// Component patterns are compiled separately, when an
    /// [`Estimator`](crate::Estimator) is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.words_per_minute.is_finite() || self.words_per_minute <= 0.0 {
            return Err(ConfigError::InvalidWordsPerMinute(self.words_per_minute));
        }

        if !is_duration(self.code_time_per_line) {
            return Err(ConfigError::InvalidCodeTimePerLine(self.code_time_per_line));
        }

        if !is_duration(self.image_time) {
            return Err(ConfigError::InvalidImageTime(self.image_time));
        }

        for component in &self.custom_components {
            if component.name.is_empty() {
                return Err(ConfigError::EmptyComponentName);
            }
            if !component.time.is_finite() {
                return Err(ConfigError::InvalidComponentTime {
                    name: component.name.clone(),
                    time: component.time,
                });
            }
        }

        Ok(())
    }
}

fn is_duration(minutes: Minutes) -> bool {
    minutes.is_finite() && minutes >= 0.0
}
