//! # upload: write one local file into the hosting bucket
//!
//! Every object is stored public-read, with a content type inferred from the
//! file extension and a short cache TTL. Successful keys go into the run's
//! [`UploadLedger`]; a failed write is returned as-is and never retried.

use std::path::Path;
use tracing::{error, info};

use crate::config::CACHE_CONTROL;
use crate::contract::{AccessPolicy, ObjectStore, PutObjectRequest, SiteFs};
use crate::error::{DeployError, Result};
use crate::ledger::UploadLedger;
use crate::mime;

pub struct Uploader<'a, S, F> {
    store: &'a S,
    fs: &'a F,
    bucket: &'a str,
}

impl<'a, S, F> Uploader<'a, S, F>
where
    S: ObjectStore,
    F: SiteFs,
{
    pub fn new(store: &'a S, fs: &'a F, bucket: &'a str) -> Self {
        Self { store, fs, bucket }
    }

    /// Build the storage request for `body` stored as `key`.
    pub fn request_for(&self, file_name: &str, key: &str, body: Vec<u8>) -> PutObjectRequest {
        PutObjectRequest {
            bucket: self.bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: mime::content_type_of(file_name).to_string(),
            cache_control: CACHE_CONTROL.to_string(),
            access: AccessPolicy::PublicRead,
        }
    }

    /// Upload `file` under `key` and record the key in `ledger`.
    pub async fn upload(&self, ledger: &mut UploadLedger, file: &Path, key: &str) -> Result<()> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let body = self.fs.read_bytes(file).map_err(|e| {
            error!(error = ?e, path = %file.display(), "[UPLOAD][ERROR] Failed to read file");
            DeployError::FileRead {
                path: file.to_path_buf(),
                source: e,
            }
        })?;

        let req = self.request_for(&file_name, key, body);
        let content_type = req.content_type.clone();
        let size = req.body.len();

        if let Err(e) = self.store.put_object(req).await {
            error!(error = ?e, bucket = self.bucket, key, "[UPLOAD][ERROR] put_object failed");
            return Err(DeployError::StorageWrite {
                bucket: self.bucket.to_string(),
                key: key.to_string(),
                source: e,
            });
        }

        ledger.record(key);
        info!(key, content_type = %content_type, bytes = size, "[UPLOAD] Upload file success");
        Ok(())
    }
}
