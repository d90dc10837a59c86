//! Submission of the run's invalidation batch to the CDN.

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};

use crate::contract::{CdnClient, InvalidationBatch, InvalidationHandle, InvalidationRequest};
use crate::error::{DeployError, Result};
use crate::invalidation::derive_invalidation_paths;
use crate::ledger::UploadLedger;

/// Issues caller references: Unix time in milliseconds, strictly increasing
/// for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct CallerReferenceClock {
    last: u128,
}

impl CallerReferenceClock {
    pub fn next_reference(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

/// What was sent to the CDN and what it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlushOutcome {
    pub distribution_id: String,
    pub batch: InvalidationBatch,
    pub handle: InvalidationHandle,
}

pub struct CdnFlusher<'a, C> {
    cdn: &'a C,
    distribution_id: Option<&'a str>,
}

impl<'a, C: CdnClient> CdnFlusher<'a, C> {
    /// `distribution_id` of `None` turns [`CdnFlusher::flush`] into a no-op.
    pub fn new(cdn: &'a C, distribution_id: Option<&'a str>) -> Self {
        Self {
            cdn,
            distribution_id: distribution_id.filter(|id| !id.trim().is_empty()),
        }
    }

    /// Invalidate every path derived from `ledger` in one batch.
    ///
    /// Returns `Ok(None)` without contacting the CDN when no distribution is set.
    pub async fn flush(
        &self,
        ledger: &UploadLedger,
        clock: &mut CallerReferenceClock,
    ) -> Result<Option<FlushOutcome>> {
        let Some(distribution_id) = self.distribution_id else {
            info!("[FLUSH] No distribution_id configured, will not flush CDN.");
            return Ok(None);
        };

        let paths = derive_invalidation_paths(ledger);
        let batch = InvalidationBatch {
            caller_reference: clock.next_reference(),
            paths: paths.into_vec(),
        };
        info!(
            distribution_id,
            caller_reference = %batch.caller_reference,
            path_count = batch.paths.len(),
            "[FLUSH] Submitting invalidation batch"
        );

        let req = InvalidationRequest {
            distribution_id: distribution_id.to_string(),
            batch: batch.clone(),
        };
        let handle = self.cdn.create_invalidation(req).await.map_err(|e| {
            error!(error = ?e, distribution_id, "[FLUSH][ERROR] create_invalidation failed");
            DeployError::InvalidationSubmit {
                distribution_id: distribution_id.to_string(),
                source: e,
            }
        })?;

        info!(
            id = handle.id.as_deref().unwrap_or("<none>"),
            location = handle.location.as_deref().unwrap_or("<none>"),
            "[FLUSH] Invalidation location"
        );
        Ok(Some(FlushOutcome {
            distribution_id: distribution_id.to_string(),
            batch,
            handle,
        }))
    }
}
