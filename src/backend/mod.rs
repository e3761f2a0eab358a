//! Byte-level object backends the store delegates transport to.
//!
//! The store owns path normalization, content typing, and serialization;
//! implementations of [`ObjectBackend`] own the wire.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

pub mod memory;
pub mod s3;

pub use memory::MemoryBackend;
pub use s3::S3Backend;

/// Outcome of the idempotent bucket-provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Created,
    AlreadyExists,
}

/// Metadata returned by a head query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    pub size: u64,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Creates the bucket the backend is bound to, tolerating prior creation.
    async fn ensure_bucket(&self) -> Result<BucketStatus>;

    /// Fetches object metadata. Absence is an error at this layer; the store
    /// decides what to do with it.
    async fn head(&self, path: &str) -> Result<ObjectMeta>;

    /// Opens a read stream over the object body. Per-chunk failures surface
    /// on the stream itself.
    async fn get(&self, path: &str) -> Result<BoxStream<'static, Result<Bytes>>>;

    /// Uploads `body` under `path` with the given content type.
    async fn put(&self, path: &str, body: Bytes, content_type: &str) -> Result<()>;
}
