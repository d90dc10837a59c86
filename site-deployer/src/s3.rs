#![doc = "S3-backed ObjectStore: stores uploaded site files in the hosting bucket."]
//
//! Bridges the core [`ObjectStore`] contract to `aws-sdk-s3`. The bucket name
//! travels with each request, so one client serves any bucket the credentials
//! can write to.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use site_deployer_core::contract::{AccessPolicy, CollaboratorError, ObjectStore, PutObjectRequest};

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn canned_acl(access: AccessPolicy) -> ObjectCannedAcl {
    match access {
        AccessPolicy::PublicRead => ObjectCannedAcl::PublicRead,
        AccessPolicy::Private => ObjectCannedAcl::Private,
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, req: PutObjectRequest) -> Result<(), CollaboratorError> {
        tracing::debug!(
            bucket = %req.bucket,
            key = %req.key,
            bytes = req.body.len(),
            "Sending PutObject"
        );
        self.client
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(ByteStream::from(req.body))
            .content_type(req.content_type)
            .cache_control(req.cache_control)
            .acl(canned_acl(req.access))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %DisplayErrorContext(&e), "S3 PutObject failed");
                Box::new(e) as CollaboratorError
            })?;
        Ok(())
    }
}
