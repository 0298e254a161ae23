//! vSphere cloud provider config (INI)

use super::types::CloudProviderConfigInput;
use crate::UserDataError;
use crate::template::{self, TemplateFunctions};
use tracing::{debug, info};

const CLOUD_PROVIDER_TEMPLATE_NAME: &str = "cloudprovider";

/// Cloud provider config template. Every value is placed verbatim.
pub const CLOUD_PROVIDER_CONFIG: &str = r#"[Global]
secret-name = "{{ secret_name }}"
secret-namespace = "{{ secret_namespace }}"
insecure-flag = "1" # set to 1 if the vCenter uses a self-signed cert
datacenters = "{{ datacenter }}"

[VirtualCenter "{{ server }}"]

[Workspace]
server = "{{ server }}"
datacenter = "{{ datacenter }}"
folder = "{{ folder }}"
default-datastore = "{{ datastore }}"
resourcepool-path = "{{ resource_pool }}"

[Disk]
scsicontrollertype = pvscsi

[Network]
public-network = "{{ network }}"
"#;

/// Contents of `/etc/kubernetes/vsphere.conf`
pub fn generate_cloud_provider_config(
    input: &CloudProviderConfigInput,
) -> Result<String, UserDataError> {
    debug!("Generating cloud provider config for server {}", input.server);

    let config = render_config(CLOUD_PROVIDER_CONFIG, input)?;

    info!("Generated cloud provider config ({} bytes)", config.len());
    Ok(config)
}

fn render_config(body: &str, input: &CloudProviderConfigInput) -> Result<String, UserDataError> {
    template::render(
        CLOUD_PROVIDER_TEMPLATE_NAME,
        body,
        &TemplateFunctions::new(),
        input,
    )
    .map_err(|e| e.context("failed to generate cloud provider config"))
}
