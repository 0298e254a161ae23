//! Generator input types
//!
//! Each generator owns one input struct. Inputs are plain values: the
//! generators only borrow them and never fill anything in.

use super::validate::validate_pairs;
use crate::UserDataError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A certificate and its private key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPair {
    pub cert: String,
    pub key: String,
}

impl CredentialPair {
    pub fn new(cert: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
        }
    }

    /// Both members are present. The content itself is not inspected.
    pub fn is_valid(&self) -> bool {
        !self.cert.is_empty() && !self.key.is_empty()
    }
}

/// Logical credential groups, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialGroup {
    /// Cluster certificate authority
    ClusterCa,
    /// etcd certificate authority
    EtcdCa,
    /// Front proxy certificate authority
    FrontProxyCa,
    /// Service account signing key pair
    ServiceAccount,
}

impl CredentialGroup {
    pub const ALL: [CredentialGroup; 4] = [
        CredentialGroup::ClusterCa,
        CredentialGroup::EtcdCa,
        CredentialGroup::FrontProxyCa,
        CredentialGroup::ServiceAccount,
    ];
}

impl fmt::Display for CredentialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialGroup::ClusterCa => write!(f, "CA"),
            CredentialGroup::EtcdCa => write!(f, "ETCD CA"),
            CredentialGroup::FrontProxyCa => write!(f, "FrontProxy CA"),
            CredentialGroup::ServiceAccount => write!(f, "ServiceAccount"),
        }
    }
}

/// The credential pairs every control plane machine receives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterCredentials {
    pub ca: CredentialPair,
    pub etcd_ca: CredentialPair,
    pub front_proxy_ca: CredentialPair,
    pub service_account: CredentialPair,
}

impl ClusterCredentials {
    pub fn pair(&self, group: CredentialGroup) -> &CredentialPair {
        match group {
            CredentialGroup::ClusterCa => &self.ca,
            CredentialGroup::EtcdCa => &self.etcd_ca,
            CredentialGroup::FrontProxyCa => &self.front_proxy_ca,
            CredentialGroup::ServiceAccount => &self.service_account,
        }
    }

    /// Required pairs in validation order
    pub fn required_pairs(&self) -> [(CredentialGroup, &CredentialPair); 4] {
        CredentialGroup::ALL.map(|group| (group, self.pair(group)))
    }
}

/// Input for a machine that initializes a new control plane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPlaneInitInput {
    pub ssh_authorized_keys: Vec<String>,
    #[serde(flatten)]
    pub credentials: ClusterCredentials,
    /// Rendered cloud provider config, written to `/etc/kubernetes/vsphere.conf`
    pub cloud_config: String,
    pub cluster_configuration: String,
    pub init_configuration: String,
}

/// Input for a machine joining an existing control plane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPlaneJoinInput {
    pub ssh_authorized_keys: Vec<String>,
    #[serde(flatten)]
    pub credentials: ClusterCredentials,
    pub cloud_config: String,
    pub join_configuration: String,
    pub bootstrap_token: String,
    pub load_balancer_address: String,
}

/// Connection parameters for the vSphere cloud provider config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudProviderConfigInput {
    pub secret_name: String,
    pub secret_namespace: String,
    pub server: String,
    pub datacenter: String,
    pub resource_pool: String,
    pub folder: String,
    pub datastore: String,
    pub network: String,
}

/// Common surface of the control plane inputs
pub trait ControlPlaneInput: Serialize + Sized {
    /// Name used in validation messages
    const NAME: &'static str;

    fn credentials(&self) -> &ClusterCredentials;

    fn with_credentials(self, credentials: ClusterCredentials) -> Self;

    fn with_cloud_config(self, cloud_config: String) -> Self;

    /// Check every required credential pair, stopping at the first gap
    fn validate_certificates(&self) -> Result<(), UserDataError> {
        validate_pairs(Self::NAME, self.credentials().required_pairs())
    }
}

impl ControlPlaneInput for ControlPlaneInitInput {
    const NAME: &'static str = "ControlPlaneInput";

    fn credentials(&self) -> &ClusterCredentials {
        &self.credentials
    }

    fn with_credentials(self, credentials: ClusterCredentials) -> Self {
        Self {
            credentials,
            ..self
        }
    }

    fn with_cloud_config(self, cloud_config: String) -> Self {
        Self {
            cloud_config,
            ..self
        }
    }
}

impl ControlPlaneInput for ControlPlaneJoinInput {
    const NAME: &'static str = "ControlPlaneJoinInput";

    fn credentials(&self) -> &ClusterCredentials {
        &self.credentials
    }

    fn with_credentials(self, credentials: ClusterCredentials) -> Self {
        Self {
            credentials,
            ..self
        }
    }

    fn with_cloud_config(self, cloud_config: String) -> Self {
        Self {
            cloud_config,
            ..self
        }
    }
}
