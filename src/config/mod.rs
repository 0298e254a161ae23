//! Generator input files
//!
//! Inputs can be written as YAML or JSON. Every field is optional in the
//! file; absent credentials show up as validation errors at generation time.

pub mod loader;
pub mod pki;

pub use loader::{InputLoader, load_input};
pub use pki::{PkiPaths, load_pki_dir};

use crate::UserDataError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
}

impl InputFormat {
    /// Pick the format from a file extension, defaulting to YAML
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Parse an input document in this format
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, UserDataError> {
        match self {
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Yaml => write!(f, "yaml"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}
