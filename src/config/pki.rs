//! kubeadm PKI directory layout
//!
//! Mirrors the file names kubeadm uses in its PKI directory, which are
//! also the names written by the control plane documents.

use crate::UserDataError;
use crate::userdata::{ClusterCredentials, CredentialGroup, CredentialPair};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Paths of the credential files inside a PKI directory
#[derive(Debug, Clone)]
pub struct PkiPaths {
    pub root: PathBuf,
}

impl PkiPaths {
    /// Create for the directory at `root`
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Relative (cert, key) file names for a group
    pub fn file_names(group: CredentialGroup) -> (&'static str, &'static str) {
        match group {
            CredentialGroup::ClusterCa => ("ca.crt", "ca.key"),
            CredentialGroup::EtcdCa => ("etcd/ca.crt", "etcd/ca.key"),
            CredentialGroup::FrontProxyCa => ("front-proxy-ca.crt", "front-proxy-ca.key"),
            CredentialGroup::ServiceAccount => ("sa.pub", "sa.key"),
        }
    }

    pub fn cert_path(&self, group: CredentialGroup) -> PathBuf {
        self.root.join(Self::file_names(group).0)
    }

    pub fn key_path(&self, group: CredentialGroup) -> PathBuf {
        self.root.join(Self::file_names(group).1)
    }
}

/// Load all four credential pairs from a PKI directory
pub async fn load_pki_dir(paths: &PkiPaths) -> Result<ClusterCredentials, UserDataError> {
    let mut credentials = ClusterCredentials::default();

    for group in CredentialGroup::ALL {
        let pair = CredentialPair::new(
            read_pem(&paths.cert_path(group)).await?,
            read_pem(&paths.key_path(group)).await?,
        );
        debug!("Loaded {} credentials from {}", group, paths.root.display());

        match group {
            CredentialGroup::ClusterCa => credentials.ca = pair,
            CredentialGroup::EtcdCa => credentials.etcd_ca = pair,
            CredentialGroup::FrontProxyCa => credentials.front_proxy_ca = pair,
            CredentialGroup::ServiceAccount => credentials.service_account = pair,
        }
    }

    info!("Loaded cluster credentials from {}", paths.root.display());
    Ok(credentials)
}

async fn read_pem(path: &Path) -> Result<String, UserDataError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| UserDataError::from(e).context(format!("failed to read {}", path.display())))
}
