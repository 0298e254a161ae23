//! User data generation for vSphere control plane machines
//!
//! Produces:
//! - Cloud-init documents for initializing or joining a control plane
//! - The INI config consumed by the vSphere cloud provider
//!
//! Control plane inputs are validated before anything is rendered; a
//! missing certificate or key fails the whole call.

pub mod cloud_provider;
pub mod controlplane;
pub mod types;
pub mod validate;

pub use cloud_provider::generate_cloud_provider_config;
pub use controlplane::{generate_control_plane_init, generate_control_plane_join};
pub use types::{
    CloudProviderConfigInput, ClusterCredentials, ControlPlaneInitInput, ControlPlaneInput,
    ControlPlaneJoinInput, CredentialGroup, CredentialPair,
};
pub use validate::validate_pairs;

/// First line of every generated cloud-init document
pub const CLOUD_CONFIG_HEADER: &str = "#cloud-config";
