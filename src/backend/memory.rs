use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream};
use tokio::sync::RwLock;

use super::{BucketStatus, ObjectBackend, ObjectMeta};

#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    content_type: String,
}

/// In-process [`ObjectBackend`] holding objects in a map.
///
/// Exists for tests, ours and downstream consumers'. Clones share storage,
/// so two stores built over clones of one backend see the same bucket.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    bucket_created: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> MemoryBackend {
        MemoryBackend::default()
    }

    /// Content type recorded for a stored object, if present.
    pub async fn content_type_of(&self, path: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|object| object.content_type.clone())
    }
}

#[async_trait]
impl ObjectBackend for MemoryBackend {
    async fn ensure_bucket(&self) -> Result<BucketStatus> {
        if self.bucket_created.swap(true, Ordering::SeqCst) {
            Ok(BucketStatus::AlreadyExists)
        } else {
            Ok(BucketStatus::Created)
        }
    }

    async fn head(&self, path: &str) -> Result<ObjectMeta> {
        let objects = self.objects.read().await;
        let object = objects
            .get(path)
            .ok_or_else(|| anyhow!("object {path} not found"))?;
        Ok(ObjectMeta {
            size: object.body.len() as u64,
            etag: None,
            last_modified: None,
        })
    }

    async fn get(&self, path: &str) -> Result<BoxStream<'static, Result<Bytes>>> {
        let objects = self.objects.read().await;
        let object = objects
            .get(path)
            .ok_or_else(|| anyhow!("object {path} not found"))?;
        Ok(Box::pin(stream::iter([Ok(object.body.clone())])))
    }

    async fn put(&self, path: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
