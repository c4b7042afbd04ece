// src/photos.rs
//! File collaborator for uploaded photos: existence + byte size.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Size in bytes, `Ok(None)` if nothing exists at `path`.
    async fn size_of(&self, path: &str) -> io::Result<Option<u64>>;
}

/// Photos on the local filesystem, optionally resolved against an upload root.
#[derive(Debug, Clone, Default)]
pub struct FsPhotoStore {
    root: Option<PathBuf>,
}

impl FsPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => PathBuf::from(path),
        }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn size_of(&self, path: &str) -> io::Result<Option<u64>> {
        match tokio::fs::metadata(self.resolve(path)).await {
            Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
