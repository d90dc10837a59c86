use serial_test::serial;
use site_deployer::load_config::{load_config, BUCKET_ENV, DISTRIBUTION_ENV};
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::{tempdir, NamedTempFile};

fn clear_env() {
    env::remove_var(BUCKET_ENV);
    env::remove_var(DISTRIBUTION_ENV);
}

/// A complete static config loads as written.
#[test]
#[serial]
fn load_config_reads_all_fields() {
    clear_env();
    let config_yaml = r#"
site_dir: /srv/www/public
bucket_name: my-site
distribution_id: E2QWRUHAPOMQZL
region: eu-west-1
blacklist:
  - .DS_Store
  - Thumbs.db
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.site_dir, PathBuf::from("/srv/www/public"));
    assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.deploy.bucket_name, "my-site");
    assert_eq!(config.deploy.distribution(), Some("E2QWRUHAPOMQZL"));
    assert!(config.deploy.is_blacklisted(".DS_Store"));
    assert!(config.deploy.is_blacklisted("Thumbs.db"));
    assert!(!config.deploy.is_blacklisted("index.html"));
}

/// Environment values win over the file.
#[test]
#[serial]
fn load_config_applies_env_overrides() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(
        config_file.path(),
        "site_dir: /srv/www\nbucket_name: from-file\ndistribution_id: EFILE\n",
    )
    .unwrap();

    env::set_var(BUCKET_ENV, "from-env");
    env::set_var(DISTRIBUTION_ENV, "EENV");
    let config = load_config(config_file.path()).expect("Config should load");
    clear_env();

    assert_eq!(config.deploy.bucket_name, "from-env");
    assert_eq!(config.deploy.distribution(), Some("EENV"));
}

/// Without a distribution the flush is disabled, not an error.
#[test]
#[serial]
fn load_config_allows_missing_distribution() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "site_dir: /srv/www\nbucket_name: b\n").unwrap();

    let config = load_config(config_file.path()).expect("Config should load");
    assert!(!config.deploy.has_distribution());
    assert!(config.deploy.blacklist.is_empty());
}

#[test]
#[serial]
fn load_config_errors_on_missing_bucket() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "site_dir: /srv/www\n").unwrap();

    let msg = load_config(config_file.path()).unwrap_err().to_string();
    assert!(msg.contains(BUCKET_ENV), "Must name the env var, got: {msg}");
}

#[test]
#[serial]
fn load_config_errors_for_invalid_file() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let msg = load_config(config_file.path()).unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn relative_site_dir_resolves_against_config_location() {
    clear_env();
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("deploy.yaml");
    write(&config_path, "site_dir: public\nbucket_name: b\n").unwrap();

    let config = load_config(&config_path).expect("Config should load");
    assert_eq!(config.site_dir, dir.path().join("public"));
}
