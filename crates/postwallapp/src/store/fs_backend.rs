use super::backend::{resolve_range, KvBackend};
use crate::error::{Result, WallError};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Durable key-value backend on the local filesystem.
///
/// ```text
/// <root>/
/// ├── entries/
/// │   └── post%3A{id}.json    # One file per scalar key
/// └── lists/
///     └── postIds.json        # JSON array per list key
/// ```
///
/// Keys are escaped so any string maps to a single safe file name. Every write
/// goes to a temp file first and is renamed into place.
pub struct FsBackend {
    root: PathBuf,
    // Serializes read-modify-write of list files within this process.
    list_lock: Mutex<()>,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            list_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join("entries")
            .join(format!("{}.json", encode_key(key)))
    }

    pub fn list_path(&self, key: &str) -> PathBuf {
        self.root
            .join("lists")
            .join(format!("{}.json", encode_key(key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(WallError::Io)?;
        }
        Ok(())
    }

    fn atomic_write(&self, target: &Path, content: &str) -> Result<()> {
        let dir = target
            .parent()
            .ok_or_else(|| WallError::Store(format!("Invalid path: {}", target.display())))?;
        self.ensure_dir(dir)?;

        let tmp_path = dir.join(format!(".kv-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(WallError::Io)?;
        fs::rename(&tmp_path, target).map_err(WallError::Io)?;
        Ok(())
    }

    fn load_list(&self, key: &str) -> Result<Vec<String>> {
        let path = self.list_path(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).map_err(WallError::Io)?;
        let list: Vec<String> = serde_json::from_str(&content).map_err(WallError::Serialization)?;
        Ok(list)
    }

    fn save_list(&self, key: &str, list: &[String]) -> Result<()> {
        let content = serde_json::to_string(list).map_err(WallError::Serialization)?;
        self.atomic_write(&self.list_path(key), &content)
    }

    fn lock_lists(&self) -> std::sync::MutexGuard<'_, ()> {
        self.list_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Escapes everything outside `[A-Za-z0-9_-]` as `%XX` per UTF-8 byte.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

impl KvBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(WallError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.atomic_write(&self.entry_path(key), value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(WallError::Io)?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entry_path(key).is_file())
    }

    fn push_front(&self, key: &str, values: &[String]) -> Result<usize> {
        let _guard = self.lock_lists();
        let existing = self.load_list(key)?;
        let mut list = Vec::with_capacity(values.len() + existing.len());
        list.extend_from_slice(values);
        list.extend(existing);
        self.save_list(key, &list)?;
        Ok(list.len())
    }

    fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let _guard = self.lock_lists();
        let list = self.load_list(key)?;
        Ok(match resolve_range(list.len(), start, stop) {
            Some((from, to)) => list[from..=to].to_vec(),
            None => Vec::new(),
        })
    }

    fn remove_one(&self, key: &str, value: &str) -> Result<bool> {
        let _guard = self.lock_lists();
        let mut list = self.load_list(key)?;
        match list.iter().position(|v| v == value) {
            Some(pos) => {
                list.remove(pos);
                self.save_list(key, &list)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::encode_key;

    #[test]
    fn encode_key_escapes_separators() {
        assert_eq!(encode_key("post:abc123"), "post%3Aabc123");
        assert_eq!(encode_key("postIds"), "postIds");
        assert_eq!(encode_key("../x"), "%2E%2E%2Fx");
        assert_eq!(encode_key("a_b-c"), "a_b-c");
    }
}
