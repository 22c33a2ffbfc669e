use crate::errors::{FileOperation, IoError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const CONFIG_FILE: &str = "guardgen.toml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error while reading configuration")]
    #[diagnostic(code(guardgen::config::io))]
    Io(#[from] IoError),

    #[error("Unable to parse toml file at '{}': {source}", .path.display())]
    #[diagnostic(code(guardgen::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional project-level defaults read from `guardgen.toml`.
/// Command-line flags win over these; built-in defaults fill the rest.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub stubs_dir: Option<PathBuf>,
    pub app_root: Option<PathBuf>,
}

impl Config {
    /// Loads the config file if present; a missing file means defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let parsed = toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(parsed)
    }
}
