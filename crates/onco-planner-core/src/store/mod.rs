//! Patient record store with an injected persistence port.
//!
//! The store owns the authoritative patient collection. Every mutation
//! re-serializes the whole collection through the port; there is no
//! partial or incremental persistence, and the last write wins.

mod json_file;
mod memory;
mod seed;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use seed::sample_patients;

use thiserror::Error;
use tracing::debug;

use crate::models::Patient;

/// Storage adapter errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unknown patient: {0}")]
    UnknownPatient(String),

    #[error("duplicate patient id: {0}")]
    DuplicateId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Port through which the whole patient collection is loaded and saved.
///
/// Implementations persist one serialized collection under one location;
/// tests substitute [`MemoryStorage`].
pub trait StoragePort {
    /// Load the persisted collection; `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<Patient>>, StorageError>;

    /// Replace the persisted collection.
    fn save(&self, patients: &[Patient]) -> Result<(), StorageError>;
}

/// Authoritative collection of patient records plus the active selection.
pub struct PatientStore<S: StoragePort> {
    storage: S,
    patients: Vec<Patient>,
    active_id: Option<String>,
}

impl<S: StoragePort> PatientStore<S> {
    /// Open the store: load persisted records, or seed the built-in
    /// sample dataset on first run.
    pub fn open(storage: S) -> StoreResult<Self> {
        let patients = match storage.load()? {
            Some(list) => list,
            None => {
                let seeded = seed::sample_patients();
                storage.save(&seeded)?;
                debug!(count = seeded.len(), "seeded sample patients");
                seeded
            }
        };
        Ok(Self {
            storage,
            patients,
            active_id: None,
        })
    }

    /// All patients, most recently added first.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Look up one patient by id.
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// The patient currently in view, if any.
    pub fn active(&self) -> Option<&Patient> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Set which patient is in view.
    pub fn select(&mut self, id: &str) -> StoreResult<()> {
        if self.get(id).is_none() {
            return Err(StoreError::UnknownPatient(id.to_string()));
        }
        self.active_id = Some(id.to_string());
        Ok(())
    }

    /// Return to the roster view.
    pub fn clear_selection(&mut self) {
        self.active_id = None;
    }

    /// Add a patient: prepends to the roster, becomes the active
    /// selection, and persists the collection.
    pub fn add(&mut self, patient: Patient) -> StoreResult<&Patient> {
        if self.patients.iter().any(|p| p.id == patient.id) {
            return Err(StoreError::DuplicateId(patient.id));
        }
        self.active_id = Some(patient.id.clone());
        self.patients.insert(0, patient);
        self.persist()?;
        Ok(&self.patients[0])
    }

    /// Replace one patient record wholesale, matched by id.
    pub fn update(&mut self, patient: Patient) -> StoreResult<()> {
        let slot = self
            .patients
            .iter_mut()
            .find(|p| p.id == patient.id)
            .ok_or_else(|| StoreError::UnknownPatient(patient.id.clone()))?;
        *slot = patient;
        self.persist()
    }

    /// Filter the roster by name or medical record number.
    pub fn search(&self, term: &str) -> Vec<&Patient> {
        self.patients.iter().filter(|p| p.matches(term)).collect()
    }

    fn persist(&self) -> StoreResult<()> {
        self.storage.save(&self.patients)?;
        debug!(count = self.patients.len(), "patient collection persisted");
        Ok(())
    }
}
