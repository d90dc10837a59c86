//! CloudFront-backed CdnClient.

use async_trait::async_trait;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;
use site_deployer_core::contract::{
    CdnClient, CollaboratorError, InvalidationHandle, InvalidationRequest,
};

pub struct CloudFrontCdn {
    client: Client,
}

impl CloudFrontCdn {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl CdnClient for CloudFrontCdn {
    async fn create_invalidation(
        &self,
        req: InvalidationRequest,
    ) -> Result<InvalidationHandle, CollaboratorError> {
        let quantity = i32::try_from(req.batch.paths.len())?;
        let paths = Paths::builder()
            .quantity(quantity)
            .set_items(Some(req.batch.paths))
            .build()?;
        let batch = InvalidationBatch::builder()
            .caller_reference(req.batch.caller_reference)
            .paths(paths)
            .build()?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(req.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %DisplayErrorContext(&e), "CloudFront CreateInvalidation failed");
                Box::new(e) as CollaboratorError
            })?;

        Ok(InvalidationHandle {
            id: output.invalidation().map(|inv| inv.id().to_string()),
            location: output.location().map(str::to_string),
        })
    }
}
