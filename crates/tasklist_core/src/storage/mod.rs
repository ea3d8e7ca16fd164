//! Key-value persistence for the task list.
//!
//! A [`Storage`] holds whole string values under string keys; reads and
//! writes always replace the full value.

use crate::error::AppError;
use std::collections::HashMap;

pub mod file_store;
pub mod json_store;

pub use file_store::FileStorage;

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Process-local storage, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set_item(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStorage, Storage};

    #[test]
    fn memory_storage_replaces_whole_value() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("slot").unwrap(), None);

        storage.set_item("slot", "[1,2,3]").unwrap();
        storage.set_item("slot", "[]").unwrap();

        assert_eq!(storage.get_item("slot").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }
}
