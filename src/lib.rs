//! vsphere-userdata library
//!
//! Generates the bootstrap payloads handed to vSphere virtual machines that
//! form or join a Kubernetes control plane, plus the vSphere cloud provider
//! config file.
//!
//! # Design Principles
//!
//! - **Validate First**: Incomplete certificate/key pairs are rejected
//!   before anything is rendered
//! - **Deterministic Output**: The same input always yields the same bytes
//! - **Pure Generation**: No I/O, no shared state; safe to call from any thread

pub mod config;
pub mod template;
pub mod userdata;

mod error;

pub use error::UserDataError;
pub use userdata::{
    CloudProviderConfigInput, ClusterCredentials, ControlPlaneInitInput, ControlPlaneJoinInput,
    CredentialGroup, CredentialPair, generate_cloud_provider_config, generate_control_plane_init,
    generate_control_plane_join,
};
