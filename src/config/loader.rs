//! Input loader
//!
//! Reads generator inputs from disk and assembles control plane inputs from
//! an input file, an optional PKI directory and an optional cloud provider
//! input.

use super::InputFormat;
use super::pki::{PkiPaths, load_pki_dir};
use crate::UserDataError;
use crate::userdata::{CloudProviderConfigInput, ControlPlaneInput, generate_cloud_provider_config};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Load a single input file, choosing the format from its extension
pub async fn load_input<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, UserDataError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path);

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| UserDataError::from(e).context(format!("failed to read {}", path.display())))?;

    debug!("Parsing {} input from {}", format, path.display());
    format
        .parse(&content)
        .map_err(|e| e.context(format!("failed to parse {}", path.display())))
}

/// Input loader builder for control plane documents
pub struct InputLoader {
    input: PathBuf,
    pki_dir: Option<PathBuf>,
    cloud_provider: Option<PathBuf>,
}

impl InputLoader {
    /// Load from the given input file
    pub fn new(input: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            pki_dir: None,
            cloud_provider: None,
        }
    }

    /// Replace the file's credentials with those in a PKI directory
    pub fn with_pki_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.pki_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Render this cloud provider input into the document's `cloud_config`
    pub fn with_cloud_provider(mut self, path: impl AsRef<Path>) -> Self {
        self.cloud_provider = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load a control plane input with all overrides applied
    pub async fn load<T>(self) -> Result<T, UserDataError>
    where
        T: ControlPlaneInput + DeserializeOwned,
    {
        let mut input: T = load_input(&self.input).await?;

        if let Some(dir) = &self.pki_dir {
            let credentials = load_pki_dir(&PkiPaths::with_root(dir)).await?;
            input = input.with_credentials(credentials);
        }

        if let Some(path) = &self.cloud_provider {
            let provider: CloudProviderConfigInput = load_input(path).await?;
            input = input.with_cloud_config(generate_cloud_provider_config(&provider)?);
            info!("Embedding cloud provider config from {}", path.display());
        }

        Ok(input)
    }
}
