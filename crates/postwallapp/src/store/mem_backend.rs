use super::backend::{resolve_range, KvBackend};
use crate::error::{Result, WallError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory key-value backend.
///
/// Scalars and lists live in separate maps, each behind its own `RwLock` so the
/// backend can be shared between request handlers. Each call is atomic on its
/// own; sequences of calls made by `PostStore` are not.
#[derive(Default)]
pub struct MemBackend {
    values: RwLock<HashMap<String, String>>,
    lists: RwLock<HashMap<String, VecDeque<String>>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(WallError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<()> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(WallError::Store("Simulated read error".to_string()));
        }
        Ok(())
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_read()?;
        Ok(read(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        write(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.check_write()?;
        write(&self.values).remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        self.check_read()?;
        Ok(read(&self.values).contains_key(key))
    }

    fn push_front(&self, key: &str, values: &[String]) -> Result<usize> {
        self.check_write()?;
        let mut lists = write(&self.lists);
        let list = lists.entry(key.to_string()).or_default();
        for value in values.iter().rev() {
            list.push_front(value.clone());
        }
        Ok(list.len())
    }

    fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        self.check_read()?;
        let lists = read(&self.lists);
        let Some(list) = lists.get(key) else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(list.len(), start, stop) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        })
    }

    fn remove_one(&self, key: &str, value: &str) -> Result<bool> {
        self.check_write()?;
        let mut lists = write(&self.lists);
        let Some(list) = lists.get_mut(key) else {
            return Ok(false);
        };
        match list.iter().position(|v| v == value) {
            Some(pos) => {
                list.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
