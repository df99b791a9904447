//! Persistent snapshot counter
//!
//! The counter is the only state that survives a restart. It is read once
//! at startup and read-modify-written after each successful capture.

use std::fs;
use std::io;
use std::path::PathBuf;

/// First counter value on a fresh install
const INITIAL_COUNTER: u64 = 1;

/// Persistence seam for the snapshot counter
pub trait CounterStore {
    /// Read the stored value, falling back to the initial value when
    /// nothing usable is stored
    fn load(&self) -> u64;

    /// Persist a new value
    fn store(&mut self, value: u64) -> io::Result<()>;
}

/// Counter stored as a decimal string in a single file
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "Counter file {} holds garbage, starting over",
                    self.path.display()
                );
                INITIAL_COUNTER
            }),
            Err(_) => INITIAL_COUNTER,
        }
    }

    fn store(&mut self, value: u64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, value.to_string())
    }
}

/// Volatile store for tests and headless runs
#[derive(Default)]
pub struct MemoryCounterStore {
    value: Option<u64>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&self) -> u64 {
        self.value.unwrap_or(INITIAL_COUNTER)
    }

    fn store(&mut self, value: u64) -> io::Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("timescape_counter_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_yields_initial_value() {
        let store = FileCounterStore::new(temp_path("missing"));
        assert_eq!(store.load(), 1);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round_trip");
        let mut store = FileCounterStore::new(&path);
        store.store(42).unwrap();
        assert_eq!(store.load(), 42);
        // A fresh store over the same file sees the persisted value
        assert_eq!(FileCounterStore::new(&path).load(), 42);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_garbage_file_yields_initial_value() {
        let path = temp_path("garbage");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(FileCounterStore::new(&path).load(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryCounterStore::new();
        assert_eq!(store.load(), 1);
        store.store(7).unwrap();
        assert_eq!(store.load(), 7);
    }
}
