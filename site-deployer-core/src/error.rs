//! Error kinds surfaced by a deployment run.
//!
//! Every variant is fatal to the run: nothing is retried and already uploaded
//! objects stay in the bucket.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::contract::CollaboratorError;

pub type Result<T, E = DeployError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("failed to list directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to upload {key:?} to bucket {bucket:?}: {source}")]
    StorageWrite {
        bucket: String,
        key: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("distribution {distribution_id:?} rejected invalidation batch: {source}")]
    InvalidationSubmit {
        distribution_id: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("{target:?} is not under deployment root {root:?}")]
    NotUnderRoot { root: PathBuf, target: PathBuf },
}
