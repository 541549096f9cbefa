//! # Image Storage
//!
//! Store pictures are uploaded to a bucket and referenced from the store row by public URL.
//! [`ImageStore`] is the seam; [`MemoryImageStore`] keeps objects in memory.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Empty upload: {0}")]
    Empty(String),

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image under a fresh path and returns that path.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorageError>;

    /// URL under which `path` is served.
    fn public_url(&self, path: &str) -> String;

    /// Inverse of [`ImageStore::public_url`]; `None` for URLs this store did not hand out.
    fn path_from_url(&self, url: &str) -> Option<String>;

    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// Checks that `file_name` names an image and returns its extension.
pub fn image_extension(file_name: &str) -> Result<String, StorageError> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    if mime.type_().as_str() != "image" {
        return Err(StorageError::NotAnImage(file_name.to_string()));
    }
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| StorageError::NotAnImage(file_name.to_string()))?;
    Ok(ext)
}

/// An uploaded object with the content type it is served with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct MemoryImageStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredImage>>,
}

impl MemoryImageStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<StoredImage> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty(file_name.to_string()));
        }
        let ext = image_extension(file_name)?;
        let content_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        let path = format!("stores/{}.{}", uuid::Uuid::new_v4(), ext);

        debug!(%path, %content_type, size = bytes.len(), "Uploading image");
        self.objects.write().await.insert(
            path.clone(),
            StoredImage {
                content_type,
                bytes,
            },
        );
        info!(%path, "Image uploaded");
        Ok(path)
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        match self.objects.write().await.remove(path) {
            Some(_) => {
                info!(%path, "Image removed");
                Ok(())
            }
            None => Err(StorageError::NotFound(path.to_string())),
        }
    }
}
