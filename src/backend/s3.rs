use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream};
use s3::{creds::Credentials, Bucket, BucketConfiguration, Region};

use super::{BucketStatus, ObjectBackend, ObjectMeta};
use crate::config::StoreConfig;

/// Size reported by a head response. A malformed negative length clamps to
/// zero instead of wrapping.
fn object_size(content_length: Option<i64>) -> u64 {
    content_length
        .and_then(|len| u64::try_from(len).ok())
        .unwrap_or_default()
}

/// S3/MinIO implementation of [`ObjectBackend`].
///
/// Uses path-style addressing throughout, which MinIO and other
/// S3-compatible endpoints expect when addressed by host:port.
pub struct S3Backend {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    bucket_name: String,
}

impl S3Backend {
    /// Builds an authenticated handle for the configured bucket. No network
    /// traffic happens here; the first round trip is `ensure_bucket`.
    pub fn connect(config: &StoreConfig) -> Result<S3Backend> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.access_secret),
            None,
            config.session_token.as_deref(),
            None,
        )
        .context("failed to build static credentials")?;

        let scheme = if config.secure { "https" } else { "http" };
        let region = Region::Custom {
            region: "us-east-1".to_string(),
            endpoint: format!("{scheme}://{}", config.address),
        };

        let bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .context("failed to build bucket handle")?
            .with_path_style();

        Ok(S3Backend {
            bucket,
            region,
            credentials,
            bucket_name: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ObjectBackend for S3Backend {
    async fn ensure_bucket(&self) -> Result<BucketStatus> {
        let created = Bucket::create_with_path_style(
            &self.bucket_name,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        let create_err = match created {
            Ok(response) if response.success() => return Ok(BucketStatus::Created),
            Ok(response) => anyhow!(
                "bucket creation returned status {}: {}",
                response.response_code,
                response.response_text
            ),
            Err(err) => err.into(),
        };

        // Creation also fails when we already own the bucket; only a
        // confirmed existence turns that into success.
        match self.bucket.exists().await {
            Ok(true) => Ok(BucketStatus::AlreadyExists),
            _ => Err(create_err),
        }
    }

    async fn head(&self, path: &str) -> Result<ObjectMeta> {
        let (head, code) = self
            .bucket
            .head_object(path)
            .await
            .with_context(|| format!("head request for {path} failed"))?;
        if code != 200 {
            return Err(anyhow!("head request for {path} returned status {code}"));
        }
        Ok(ObjectMeta {
            size: object_size(head.content_length),
            etag: head.e_tag,
            last_modified: head.last_modified,
        })
    }

    async fn get(&self, path: &str) -> Result<BoxStream<'static, Result<Bytes>>> {
        let response = self
            .bucket
            .get_object(path)
            .await
            .with_context(|| format!("get request for {path} failed"))?;
        if response.status_code() != 200 {
            return Err(anyhow!(
                "get request for {path} returned status {}",
                response.status_code()
            ));
        }
        let body = response.bytes().clone();
        Ok(Box::pin(stream::iter([Ok(body)])))
    }

    async fn put(&self, path: &str, body: Bytes, content_type: &str) -> Result<()> {
        let response = self
            .bucket
            .put_object_with_content_type(path, &body, content_type)
            .await
            .with_context(|| format!("put request for {path} failed"))?;
        if !(200..300).contains(&response.status_code()) {
            return Err(anyhow!(
                "put request for {path} returned status {}",
                response.status_code()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_size_clamps_malformed_lengths() {
        assert_eq!(object_size(Some(1024)), 1024);
        assert_eq!(object_size(Some(0)), 0);
        assert_eq!(object_size(Some(-1)), 0);
        assert_eq!(object_size(None), 0);
    }
}
