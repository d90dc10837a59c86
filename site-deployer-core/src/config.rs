use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Cache-Control value set on every uploaded object. Long-lived caching is the
/// CDN's job, not the bucket's.
pub const CACHE_CONTROL: &str = "60";

/// Settings for one deployment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub bucket_name: String,
    /// CloudFront distribution to flush. Absent or blank disables the flush.
    #[serde(default)]
    pub distribution_id: Option<String>,
    /// Bare file names that are never uploaded, at any depth.
    #[serde(default)]
    pub blacklist: BTreeSet<String>,
}

impl DeployConfig {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Self::default()
        }
    }

    pub fn with_distribution(mut self, distribution_id: impl Into<String>) -> Self {
        self.distribution_id = Some(distribution_id.into());
        self
    }

    pub fn with_blacklist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.extend(names.into_iter().map(Into::into));
        self
    }

    /// The distribution id, if one is configured and not blank.
    pub fn distribution(&self) -> Option<&str> {
        self.distribution_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_distribution(&self) -> bool {
        self.distribution().is_some()
    }

    pub fn is_blacklisted(&self, file_name: &str) -> bool {
        self.blacklist.contains(file_name)
    }

    pub fn trace_loaded(&self) {
        info!(
            bucket = %self.bucket_name,
            distribution_id = self.distribution().unwrap_or("<none>"),
            blacklist_count = self.blacklist.len(),
            "Loaded DeployConfig"
        );
        debug!(?self, "DeployConfig loaded (full debug)");
    }
}
