//! Whole-collection JSON file storage.
//!
//! One JSON array in one file, read at startup and rewritten in full on
//! every save. No schema versioning.

use std::fs;
use std::path::PathBuf;

use super::{StorageError, StoragePort};
use crate::models::Patient;

/// Persists the patient collection as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StoragePort for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Patient>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, patients: &[Patient]) -> Result<(), StorageError> {
        let json = serde_json::to_string(patients)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("patients.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("patients.json"));

        let patients = super::super::sample_patients();
        storage.save(&patients).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, patients);
    }

    #[test]
    fn test_save_overwrites_previous_collection() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("patients.json"));

        let patients = super::super::sample_patients();
        storage.save(&patients).unwrap();
        storage.save(&patients[..1].to_vec()).unwrap();

        assert_eq!(storage.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(&path, "not json").unwrap();

        let storage = JsonFileStorage::new(path);
        assert!(matches!(storage.load(), Err(StorageError::Json(_))));
    }
}
