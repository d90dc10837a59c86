//! `load_config` module: Loads a static YAML deployment file and merges environment overrides
//! into a [`DeployConfig`] plus the site directory to deploy.
//!
//! # Responsibilities
//! - Parse the user-supplied YAML file into typed structs
//! - Apply `DEPLOY_BUCKET` / `DEPLOY_DISTRIBUTION_ID` from the environment over the file values
//! - Resolve a relative `site_dir` against the directory holding the config file
//!
//! AWS credentials are never read here; the AWS provider chain supplies them.
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use serde::Deserialize;
use site_deployer_core::config::DeployConfig;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const BUCKET_ENV: &str = "DEPLOY_BUCKET";
pub const DISTRIBUTION_ENV: &str = "DEPLOY_DISTRIBUTION_ID";

/// YAML-side shape of the config file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    site_dir: PathBuf,
    #[serde(default)]
    bucket_name: Option<String>,
    #[serde(default)]
    distribution_id: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    blacklist: BTreeSet<String>,
}

/// Fully merged configuration for the `deploy` command.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub site_dir: PathBuf,
    pub region: Option<String>,
    pub deploy: DeployConfig,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "[CONFIG] Loading configuration from file");

    let content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "[CONFIG] Failed to read config file");
        anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e)
    })?;

    let raw: RawConfig = serde_yaml::from_str(&content).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "[CONFIG] Failed to parse config YAML");
        anyhow::anyhow!("Failed to parse config YAML: {e}")
    })?;

    let bucket_name = env_override(BUCKET_ENV)
        .or(raw.bucket_name)
        .filter(|b| !b.trim().is_empty())
        .with_context(|| {
            format!("bucket_name missing: set it in {path_ref:?} or via {BUCKET_ENV}")
        })?;
    let distribution_id = env_override(DISTRIBUTION_ENV).or(raw.distribution_id);

    let site_dir = if raw.site_dir.is_relative() {
        path_ref
            .parent()
            .map(|dir| dir.join(&raw.site_dir))
            .unwrap_or(raw.site_dir)
    } else {
        raw.site_dir
    };

    let deploy = DeployConfig {
        bucket_name,
        distribution_id,
        blacklist: raw.blacklist,
    };

    info!(
        site_dir = %site_dir.display(),
        bucket = %deploy.bucket_name,
        "[CONFIG] Config loaded and merged successfully"
    );

    Ok(CliConfig {
        site_dir,
        region: raw.region,
        deploy,
    })
}

fn env_override(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            info!(var, "[CONFIG] Using value from environment");
            Some(value)
        }
        _ => None,
    }
}
