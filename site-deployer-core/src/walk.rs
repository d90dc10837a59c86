//! Recursive upload of a directory tree.
//!
//! Traversal uses an explicit stack. Blacklisted file names are skipped without
//! logging. Any directory that cannot be listed aborts the walk.

use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::config::DeployConfig;
use crate::contract::{ObjectStore, SiteFs};
use crate::error::{DeployError, Result};
use crate::ledger::UploadLedger;
use crate::path::{join_prefix, normalize_prefix};
use crate::upload::Uploader;

pub struct DirectoryWalker<'a, S, F> {
    uploader: Uploader<'a, S, F>,
    fs: &'a F,
    config: &'a DeployConfig,
}

impl<'a, S, F> DirectoryWalker<'a, S, F>
where
    S: ObjectStore,
    F: SiteFs,
{
    pub fn new(uploader: Uploader<'a, S, F>, fs: &'a F, config: &'a DeployConfig) -> Self {
        Self {
            uploader,
            fs,
            config,
        }
    }

    /// Upload every eligible file below `directory`, keyed under `prefix`.
    pub async fn walk(
        &self,
        ledger: &mut UploadLedger,
        directory: &Path,
        prefix: &str,
    ) -> Result<()> {
        let mut pending: Vec<(PathBuf, String)> =
            vec![(directory.to_path_buf(), normalize_prefix(prefix))];

        while let Some((dir, prefix)) = pending.pop() {
            debug!(dir = %dir.display(), prefix = %prefix, "[WALK] Listing directory");

            let children = self.fs.list_children(&dir).map_err(|e| {
                error!(error = ?e, dir = %dir.display(), "[WALK][ERROR] Failed to list directory");
                DeployError::DirectoryRead {
                    path: dir.clone(),
                    source: e,
                }
            })?;

            let mut subdirs = Vec::new();
            for child in children {
                if child.is_dir {
                    // Every queued prefix ends in `/`, even for blank names.
                    subdirs.push((child.path, join_prefix(&prefix, &child.name) + "/"));
                } else if child.is_file && !self.config.is_blacklisted(&child.name) {
                    let key = join_prefix(&prefix, &child.name);
                    self.uploader.upload(ledger, &child.path, &key).await?;
                }
            }
            // Reversed so subdirectories are popped in listing order.
            pending.extend(subdirs.into_iter().rev());
        }
        Ok(())
    }
}
