use super::fs_backend::FsBackend;
use super::post_store::PostStore;
use std::path::PathBuf;

/// Production store: posts persisted under a data directory.
pub type FileStore = PostStore<FsBackend>;

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PostStore::with_backend(FsBackend::new(root))
    }
}
