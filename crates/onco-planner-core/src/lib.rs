//! Onco-Planner Core Library
//!
//! Local-first treatment-planning support for breast-surgery oncology:
//! patient records, AI-suggested plan selection, dose calculation and
//! cycle scheduling, all persisted on-device.
//!
//! # Architecture
//!
//! ```text
//! Clinical markers ──▶ Pathway generation ──▶ Doctor selects pathway
//!                                                      │
//!                                          Regimen generation (per category)
//!                                                      │
//!                                  Doctor overrides per-category selections
//!                                          │                       │
//!                                          ▼                       ▼
//!                                  Dose calculator          Schedule projector
//!                               (BSA / weight / fixed)     (preview ─▶ commit)
//!                                          │                       │
//!                                          └──────────┬────────────┘
//!                                                     ▼
//!                                            Patient timeline
//!                                                     │
//!                                      [Patient store ─▶ storage port]
//! ```
//!
//! # Core Principle
//!
//! **Generated suggestions never apply themselves.** Every plan mutation
//! goes through a transition that validates the input and leaves the
//! record untouched on failure, and schedule projection is a pure
//! preview until explicitly committed.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, TreatmentOption, RegimenOption, etc.)
//! - [`planning`]: Plan-selection transitions and their invariants
//! - [`dosage`]: Body-surface-area and per-patient dose computation
//! - [`schedule`]: Cycle-schedule projection with preview/commit protocol
//! - [`store`]: Patient record store with an injected persistence port
//! - [`side_effects`]: Fixed catalogue of known side effects

pub mod dosage;
pub mod models;
pub mod planning;
pub mod schedule;
pub mod side_effects;
pub mod store;

// Re-export commonly used types
pub use dosage::{body_surface_area, dose_sheet, drug_dose, DoseLine};
pub use models::{
    ClinicalMarkers, DetailedRegimenPlan, DoseUnit, DrugDetail, EventKind, MolecularSubtype,
    Patient, PathwayKind, RegimenCategory, RegimenOption, SelectedRegimens, TreatmentEvent,
    TreatmentOption, TreatmentStage,
};
pub use planning::{PlanError, PlanResult};
pub use schedule::{project_schedule, PlannedEvent, SchedulePreview};
pub use side_effects::{side_effect_detail, side_effect_labels, SideEffectDetail};
pub use store::{
    sample_patients, JsonFileStorage, MemoryStorage, PatientStore, StorageError, StoragePort,
    StoreError,
};
