use crate::api::PostwallApi;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway data directory for tests that need the durable backend.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A fresh store over the same directory, as a restarted process would see it.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root.clone())
    }

    pub fn api(&self) -> PostwallApi<FileStore> {
        PostwallApi::new(self.store())
    }
}
