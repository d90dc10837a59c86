//! # contract: interfaces to the collaborators a deployment talks to
//!
//! The pipeline never reaches the network or the disk directly. It goes through
//! three traits:
//! - [`ObjectStore`]: writes one blob under a bucket-relative key.
//! - [`CdnClient`]: submits one invalidation batch and returns a tracking handle.
//! - [`SiteFs`]: lists directories and reads file bytes.
//!
//! ## Mocking & Testing
//! - The traits are annotated for `mockall`, so tests in this crate and in the CLI
//!   crate (through the `test-export-mocks` feature) can script every call.
//!
//! ## Adding New Backends
//! - Implement the trait for your destination and convert upstream failures to a
//!   [`CollaboratorError`]. The pipeline attaches the bucket/key/distribution context.

use async_trait::async_trait;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mockall::automock;

/// Boxed error returned by remote collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Canned access control applied to a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessPolicy {
    /// Anyone may read the object; required for website hosting.
    PublicRead,
    Private,
}

/// Everything needed to store one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    /// Bucket-relative key, forward-slash separated, no leading slash.
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub cache_control: String,
    pub access: AccessPolicy,
}

/// A set of paths submitted together for invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationBatch {
    /// Uniqueness token; must differ for every batch sent to the same distribution.
    pub caller_reference: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub distribution_id: String,
    pub batch: InvalidationBatch,
}

/// Tracking handle returned by the CDN for a submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvalidationHandle {
    pub id: Option<String>,
    pub location: Option<String>,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Bare file name, no directory components.
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_file: bool,
}

/// Trait for writing objects into the hosting bucket.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `req.body` under `req.key`, overwriting any existing object.
    async fn put_object(&self, req: PutObjectRequest) -> Result<(), CollaboratorError>;
}

/// Trait for purging cached paths at the CDN.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CdnClient: Send + Sync {
    async fn create_invalidation(
        &self,
        req: InvalidationRequest,
    ) -> Result<InvalidationHandle, CollaboratorError>;
}

/// Filesystem access used by the directory walk and the uploader.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait SiteFs: Send + Sync {
    /// List the immediate children of `dir`.
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    fn read_bytes(&self, file: &Path) -> io::Result<Vec<u8>>;
}

/// [`SiteFs`] over the local disk. Children are returned sorted by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl SiteFs for LocalFs {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            // Follows symlinks; a dangling link is neither file nor directory.
            let (is_dir, is_file) = match fs::metadata(&path) {
                Ok(meta) => (meta.is_dir(), meta.is_file()),
                Err(_) => (false, false),
            };
            children.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
                is_file,
            });
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn read_bytes(&self, file: &Path) -> io::Result<Vec<u8>> {
        fs::read(file)
    }
}
