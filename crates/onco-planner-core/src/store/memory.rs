//! In-memory storage adapter for tests.

use std::cell::RefCell;

use super::{StorageError, StoragePort};
use crate::models::Patient;

/// Keeps the "persisted" collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: RefCell<Option<Vec<Patient>>>,
}

impl MemoryStorage {
    /// Empty storage; the store will seed its sample dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a persisted collection.
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            saved: RefCell::new(Some(patients)),
        }
    }

    /// Snapshot of the last saved collection.
    pub fn saved(&self) -> Option<Vec<Patient>> {
        self.saved.borrow().clone()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Patient>>, StorageError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, patients: &[Patient]) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = Some(patients.to_vec());
        Ok(())
    }
}
