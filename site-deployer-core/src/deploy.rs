//! High-level pipeline: uploads a site directory, then flushes the CDN.
//!
//! A [`DeploySession`] bundles the configuration, the collaborators and the
//! [`UploadLedger`] of exactly one run. The flush only ever runs after the walk
//! has returned successfully; any error stops the run where it happened and
//! leaves already uploaded objects in place.
//!
//! # Navigation
//! - Main entrypoint: [`DeploySession::run`]
//! - Individual steps: [`DeploySession::upload_file`], [`DeploySession::upload_directory`],
//!   [`DeploySession::walk`], [`DeploySession::flush_cdn`]

use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

use crate::config::DeployConfig;
use crate::contract::{CdnClient, ObjectStore, SiteFs};
use crate::error::Result;
use crate::flush::{CallerReferenceClock, CdnFlusher, FlushOutcome};
use crate::ledger::UploadLedger;
use crate::path::relative_key;
use crate::upload::Uploader;
use crate::walk::DirectoryWalker;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub bucket: String,
    pub uploaded: Vec<String>,
    /// `None` when no distribution was configured.
    pub invalidation: Option<FlushOutcome>,
}

pub struct DeploySession<S, C, F> {
    config: DeployConfig,
    store: S,
    cdn: C,
    fs: F,
    ledger: UploadLedger,
    clock: CallerReferenceClock,
}

impl<S, C, F> DeploySession<S, C, F>
where
    S: ObjectStore,
    C: CdnClient,
    F: SiteFs,
{
    pub fn new(config: DeployConfig, store: S, cdn: C, fs: F) -> Self {
        config.trace_loaded();
        Self {
            config,
            store,
            cdn,
            fs,
            ledger: UploadLedger::new(),
            clock: CallerReferenceClock::default(),
        }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn ledger(&self) -> &UploadLedger {
        &self.ledger
    }

    pub async fn upload_file(&mut self, file: &Path, key: &str) -> Result<()> {
        let uploader = Uploader::new(&self.store, &self.fs, &self.config.bucket_name);
        uploader.upload(&mut self.ledger, file, key).await
    }

    /// Upload `directory` with keys relative to `root`.
    pub async fn upload_directory(&mut self, root: &Path, directory: &Path) -> Result<()> {
        let prefix = relative_key(root, directory)?;
        self.walk(directory, &prefix).await
    }

    pub async fn walk(&mut self, directory: &Path, prefix: &str) -> Result<()> {
        let walker = DirectoryWalker::new(
            Uploader::new(&self.store, &self.fs, &self.config.bucket_name),
            &self.fs,
            &self.config,
        );
        walker.walk(&mut self.ledger, directory, prefix).await
    }

    pub async fn flush_cdn(&mut self) -> Result<Option<FlushOutcome>> {
        let flusher = CdnFlusher::new(&self.cdn, self.config.distribution());
        flusher.flush(&self.ledger, &mut self.clock).await
    }

    /// Deploy the whole of `site_dir` to the bucket root, then flush the CDN.
    pub async fn run(&mut self, site_dir: &Path) -> Result<DeployReport> {
        info!(site_dir = %site_dir.display(), bucket = %self.config.bucket_name, "[DEPLOY] Starting deployment");

        if let Err(e) = self.upload_directory(site_dir, site_dir).await {
            error!(error = %e, uploaded = self.ledger.len(), "[DEPLOY][ERROR] Upload aborted");
            return Err(e);
        }
        info!(uploaded = self.ledger.len(), "[DEPLOY] All uploads complete");

        let invalidation = match self.flush_cdn().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "[DEPLOY][ERROR] CDN flush failed");
                return Err(e);
            }
        };

        Ok(DeployReport {
            bucket: self.config.bucket_name.clone(),
            uploaded: self.ledger.to_vec(),
            invalidation,
        })
    }
}
