//! Control plane cloud-init documents
//!
//! Both documents write the cluster PKI and the cloud provider config to
//! disk, then hand kubeadm a config file. They differ only in the kubeadm
//! file and the operation they request.

use super::types::{ControlPlaneInitInput, ControlPlaneInput, ControlPlaneJoinInput};
use super::CLOUD_CONFIG_HEADER;
use crate::UserDataError;
use crate::template::{self, DocumentContext, TemplateFunctions};
use tracing::{debug, info};

macro_rules! control_plane_preamble {
    () => {
        r#"{{ header }}
{% if ssh_authorized_keys %}ssh_authorized_keys:{% for key in ssh_authorized_keys %}
- "{{ key }}"{% endfor %}{% endif %}

write_files:
-   path: /etc/test/pki/ca.crt
    encoding: "base64"
    owner: root:root
    permissions: '0640'
    content: |
      {{ ca.cert | base64_encode }}

-   path: /etc/test/pki/ca.key
    encoding: "base64"
    owner: root:root
    permissions: '0600'
    content: |
      {{ ca.key | base64_encode }}

-   path: /etc/test/pki/etcd/ca.crt
    encoding: "base64"
    owner: root:root
    permissions: '0640'
    content: |
      {{ etcd_ca.cert | base64_encode }}

-   path: /etc/test/pki/etcd/ca.key
    encoding: "base64"
    owner: root:root
    permissions: '0600'
    content: |
      {{ etcd_ca.key | base64_encode }}

-   path: /etc/test/pki/front-proxy-ca.crt
    encoding: "base64"
    owner: root:root
    permissions: '0640'
    content: |
      {{ front_proxy_ca.cert | base64_encode }}

-   path: /etc/test/pki/front-proxy-ca.key
    encoding: "base64"
    owner: root:root
    permissions: '0600'
    content: |
      {{ front_proxy_ca.key | base64_encode }}

-   path: /etc/test/pki/sa.pub
    encoding: "base64"
    owner: root:root
    permissions: '0640'
    content: |
      {{ service_account.cert | base64_encode }}

-   path: /etc/test/pki/sa.key
    encoding: "base64"
    owner: root:root
    permissions: '0600'
    content: |
      {{ service_account.key | base64_encode }}

-   path: /etc/kubernetes/vsphere.conf
    encoding: "base64"
    owner: root:root
    permissions: '0600'
    content: |
      {{ cloud_config | base64_encode }}

"#
    };
}

/// kubeadm config path for a new control plane
pub const KUBEADM_INIT_CONFIG_PATH: &str = "/tmp/kubeadm.yaml";

/// kubeadm config path for a joining control plane machine
pub const KUBEADM_JOIN_CONFIG_PATH: &str = "/tmp/kubeadm-controlplane-join-config.yaml";

const CONTROL_PLANE_TEMPLATE_NAME: &str = "controlplane";
const CONTROL_PLANE_JOIN_TEMPLATE_NAME: &str = "controlplane-join";

/// Cloud-init template for the first control plane machine
pub const CONTROL_PLANE_CLOUD_INIT: &str = concat!(
    control_plane_preamble!(),
    r#"-   path: /tmp/kubeadm.yaml
    owner: root:root
    permissions: '0640'
    content: |
      ---
{{ cluster_configuration | indent(6) }}
      ---
{{ init_configuration | indent(6) }}
kubeadm:
  operation: init
  config: /tmp/kubeadm.yaml

"#
);

/// Cloud-init template for control plane machines joining a cluster
pub const CONTROL_PLANE_JOIN_CLOUD_INIT: &str = concat!(
    control_plane_preamble!(),
    r#"-   path: /tmp/kubeadm-controlplane-join-config.yaml
    owner: root:root
    permissions: '0640'
    content: |
{{ join_configuration | indent(6) }}
kubeadm:
  operation: join
  config: /tmp/kubeadm-controlplane-join-config.yaml
"#
);

/// User data for the machine that initializes a new control plane
pub fn generate_control_plane_init(input: &ControlPlaneInitInput) -> Result<String, UserDataError> {
    debug!(
        "Generating control plane init user data ({} SSH keys)",
        input.ssh_authorized_keys.len()
    );

    generate(
        CONTROL_PLANE_TEMPLATE_NAME,
        CONTROL_PLANE_CLOUD_INIT,
        input,
        "failed to generate user data for new control plane machine",
    )
}

/// User data for a machine joining an existing control plane
pub fn generate_control_plane_join(input: &ControlPlaneJoinInput) -> Result<String, UserDataError> {
    debug!(
        "Generating control plane join user data ({} SSH keys)",
        input.ssh_authorized_keys.len()
    );

    generate(
        CONTROL_PLANE_JOIN_TEMPLATE_NAME,
        CONTROL_PLANE_JOIN_CLOUD_INIT,
        input,
        "failed to generate user data for machine joining control plane",
    )
}

fn generate<T: ControlPlaneInput>(
    name: &str,
    body: &str,
    input: &T,
    failure: &str,
) -> Result<String, UserDataError> {
    input
        .validate_certificates()
        .map_err(|e| e.context(format!("{} is invalid", T::NAME)))?;

    let ctx = DocumentContext::new(CLOUD_CONFIG_HEADER, input);
    let userdata = template::render(name, body, &TemplateFunctions::standard(), &ctx)
        .map_err(|e| e.context(failure))?;

    info!("Generated {} user data ({} bytes)", name, userdata.len());
    Ok(userdata)
}
