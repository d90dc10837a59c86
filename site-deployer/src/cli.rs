//! This module implements the CLI interface for site-deployer: command parsing,
//! configuration loading, wiring the AWS clients into a deployment session, and
//! user-visible output.
//!
//! All deployment logic lives in the [`site-deployer-core`] crate. This module is
//! strictly glue.
//!
//! ## How To Use
//! - From a shell: `site-deployer deploy --config deploy.yaml`.
//! - Programmatically or from tests: call [`run`] with a constructed [`Cli`].
//!
//! [`site-deployer-core`]: ../../site-deployer-core/

use crate::cloudfront::CloudFrontCdn;
use crate::load_config::load_config;
use crate::s3::S3Store;
use anyhow::Result;
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use site_deployer_core::contract::LocalFs;
use site_deployer_core::deploy::DeploySession;
use std::path::PathBuf;

/// CLI for site-deployer: publish a static site to S3 and flush CloudFront.
#[derive(Parser)]
#[clap(
    name = "site-deployer",
    version,
    about = "Upload a static site to an S3 website bucket and invalidate the CloudFront cache"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the configured site directory, then invalidate changed CDN paths
    Deploy {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Upload only; do not submit a CDN invalidation
        #[clap(long)]
        skip_invalidation: bool,
    },
}

/// Async CLI entrypoint shared by main() and integration tests.
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Deploy {
            config,
            skip_invalidation,
        } => {
            let mut config = load_config(config)?;
            if skip_invalidation {
                tracing::info!("Invalidation skipped by --skip-invalidation");
                config.deploy.distribution_id = None;
            }

            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = config.region.clone() {
                loader = loader.region(aws_sdk_s3::config::Region::new(region));
            }
            let sdk_config = loader.load().await;

            let mut session = DeploySession::new(
                config.deploy,
                S3Store::new(&sdk_config),
                CloudFrontCdn::new(&sdk_config),
                LocalFs,
            );
            tracing::info!(command = "deploy", site_dir = %config.site_dir.display(), "Starting deployment");
            match session.run(&config.site_dir).await {
                Ok(report) => {
                    tracing::info!(
                        command = "deploy",
                        uploaded = report.uploaded.len(),
                        "Deployment complete"
                    );
                    println!("Deployment complete.\nReport:");
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "deploy", error = %e, "Deployment failed");
                    Err(e.into())
                }
            }
        }
    }
}
