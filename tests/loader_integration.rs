//! Integration tests for loading generator inputs from disk using tempfile

use std::fs;
use tempfile::TempDir;
use vsphere_userdata::config::{InputLoader, PkiPaths, load_input};
use vsphere_userdata::{
    CloudProviderConfigInput, ControlPlaneInitInput, ControlPlaneJoinInput, CredentialGroup,
    generate_control_plane_init, generate_control_plane_join,
};

fn write_pki(root: &std::path::Path) {
    fs::create_dir_all(root.join("etcd")).unwrap();
    for group in CredentialGroup::ALL {
        let (cert, key) = PkiPaths::file_names(group);
        fs::write(root.join(cert), format!("-----BEGIN {group}-----\n")).unwrap();
        fs::write(root.join(key), format!("-----BEGIN {group} KEY-----\n")).unwrap();
    }
}

/// Init input file plus PKI directory plus cloud provider input
#[tokio::test]
async fn test_init_from_files() {
    let temp = TempDir::new().unwrap();
    let pki = temp.path().join("pki");
    write_pki(&pki);

    let input = temp.path().join("init.yaml");
    fs::write(
        &input,
        r#"ssh_authorized_keys:
  - ssh-rsa AAAA admin
cluster_configuration: |
  apiVersion: kubeadm.k8s.io/v1beta1
  kind: ClusterConfiguration
init_configuration: |
  apiVersion: kubeadm.k8s.io/v1beta1
  kind: InitConfiguration
"#,
    )
    .unwrap();

    let provider = temp.path().join("provider.json");
    fs::write(
        &provider,
        r#"{"server": "vc.example.com", "datacenter": "dc0", "secret_name": "creds"}"#,
    )
    .unwrap();

    let loaded: ControlPlaneInitInput = InputLoader::new(&input)
        .with_pki_dir(&pki)
        .with_cloud_provider(&provider)
        .load()
        .await
        .unwrap();

    assert!(loaded.cloud_config.contains("secret-name = \"creds\""));

    let doc = generate_control_plane_init(&loaded).unwrap();
    assert!(doc.starts_with("#cloud-config\nssh_authorized_keys:\n- \"ssh-rsa AAAA admin\"\n"));
    assert!(doc.contains("      kind: InitConfiguration\n"));
    assert!(doc.contains("  operation: init\n"));
}

/// Join input without credentials fails validation after loading
#[tokio::test]
async fn test_join_without_credentials() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("join.yaml");
    fs::write(&input, "join_configuration: \"kind: JoinConfiguration\"\n").unwrap();

    let loaded: ControlPlaneJoinInput = load_input(&input).await.unwrap();
    let err = generate_control_plane_join(&loaded).unwrap_err();

    assert_eq!(err.missing_credential(), Some(CredentialGroup::ClusterCa));
}

/// A PKI directory missing the etcd key is an I/O error, not a validation error
#[tokio::test]
async fn test_incomplete_pki_dir() {
    let temp = TempDir::new().unwrap();
    let pki = temp.path().join("pki");
    write_pki(&pki);
    fs::remove_file(pki.join("etcd/ca.key")).unwrap();

    let input = temp.path().join("join.yaml");
    fs::write(&input, "bootstrap_token: abcdef.0123456789abcdef\n").unwrap();

    let result = InputLoader::new(&input)
        .with_pki_dir(&pki)
        .load::<ControlPlaneJoinInput>()
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.missing_credential(), None);
    assert!(err.to_string().contains("etcd/ca.key"));
}

/// Malformed JSON input
#[tokio::test]
async fn test_malformed_json_input() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("provider.json");
    fs::write(&input, "{\"server\": ").unwrap();

    let result = load_input::<CloudProviderConfigInput>(&input).await;
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("failed to parse "));
}
