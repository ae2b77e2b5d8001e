use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use readtime::{Configuration, CustomComponent};
use serde::Serialize;
use thiserror::Error;

/// Prefix of environment variables overriding settings, e.g. `READTIME_WORDS_PER_MINUTE`
pub const ENV_PREFIX: &str = "READTIME_";
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, From, Error)]
pub enum SettingsError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ComponentArgError {
    #[error("expected NAME=MINUTES")]
    MissingSeparator,

    #[error("component name can't be empty")]
    EmptyName,

    #[error("'{0}' is not a number of minutes")]
    InvalidTime(String),
}

/// Settings given on the command line, taking precedence over every other source
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_per_minute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_time_per_line: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_time: Option<f64>,
}

/// Resolves the configuration directory
///
/// Nothing is created, a missing directory just means there's no settings file.
pub fn config_dir(override_path: Option<PathBuf>) -> Result<PathBuf, SettingsError> {
    override_path
        .or_else(|| {
            ProjectDirs::from("com", "ReadTime", "readtime")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
        .ok_or(SettingsError::NoDirectory)
}

/// Layers defaults, the settings file, the environment and `overrides`
pub fn load(config_dir: &Path, overrides: &Overrides) -> Result<Configuration, SettingsError> {
    // Grab default configuration
    let mut settings = Figment::from(Serialized::defaults(Configuration::default()));

    let settings_toml = config_dir.join(SETTINGS_FILE);
    if settings_toml.exists() {
        tracing::debug!(path = %settings_toml.display(), "loading settings file");
        settings = settings.merge(Toml::file(settings_toml));
    }

    let configuration = settings
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .map_err(Box::new)?;

    Ok(configuration)
}

/// Parses a `NAME=MINUTES` command line argument
pub fn parse_component(argument: &str) -> Result<CustomComponent, ComponentArgError> {
    let (name, time) = argument
        .rsplit_once('=')
        .ok_or(ComponentArgError::MissingSeparator)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ComponentArgError::EmptyName);
    }

    let time = time
        .trim()
        .parse::<f64>()
        .map_err(|_| ComponentArgError::InvalidTime(time.to_string()))?;

    Ok(CustomComponent::new(name, time))
}
