//! Workflow facade joining the advisor, plan state and patient store.
//!
//! Each operation works on a copy of the patient and writes back through
//! the store only after every step succeeded, so a failed generation or
//! a rejected transition leaves the stored record in its previous valid
//! state. Requests to the advisor are issued synchronously one at a
//! time, which keeps responses in request order without any gating.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use onco_planner_core::dosage::{self, DoseLine};
use onco_planner_core::models::{ClinicalMarkers, EventKind, Patient, RegimenCategory, TreatmentEvent};
use onco_planner_core::planning::PlanError;
use onco_planner_core::schedule::{self, SchedulePreview};
use onco_planner_core::store::{PatientStore, StoragePort, StoreError};

use crate::client::{AdvisorError, TreatmentAdvisor};

/// Workflow errors.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown timeline event: {0}")]
    UnknownEvent(String),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

/// Drives the treatment-planning workflow against one advisor.
pub struct TreatmentAssistant<A: TreatmentAdvisor> {
    advisor: A,
}

impl<A: TreatmentAdvisor> TreatmentAssistant<A> {
    pub fn new(advisor: A) -> Self {
        Self { advisor }
    }

    pub fn advisor(&self) -> &A {
        &self.advisor
    }

    fn patient<S: StoragePort>(
        store: &PatientStore<S>,
        patient_id: &str,
    ) -> AssistantResult<Patient> {
        store
            .get(patient_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownPatient(patient_id.to_string()).into())
    }

    /// Save edited clinical markers.
    pub fn update_markers<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        markers: ClinicalMarkers,
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        patient.markers = markers;
        store.update(patient)?;
        Ok(())
    }

    /// Persist measured height/weight when the calculator reports a valid
    /// pair. Returns whether the record changed.
    pub fn update_anthropometrics<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        height_cm: f64,
        weight_kg: f64,
    ) -> AssistantResult<bool> {
        let mut patient = Self::patient(store, patient_id)?;
        let changed = patient.set_anthropometrics(height_cm, weight_kg);
        if changed {
            store.update(patient)?;
        }
        Ok(changed)
    }

    /// Generate high-level pathway options and apply them.
    pub fn generate_pathways<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        let options = self
            .advisor
            .pathway_options(&patient, &patient.markers)
            .map_err(|e| {
                warn!(patient = patient_id, error = %e, "pathway generation failed");
                e
            })?;
        patient.apply_treatment_options(options)?;
        store.update(patient)?;
        Ok(())
    }

    /// Select a different high-level pathway.
    pub fn choose_pathway<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        option_id: &str,
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        patient.select_pathway(option_id)?;
        store.update(patient)?;
        Ok(())
    }

    /// Generate detailed regimens under the selected pathway and apply
    /// them, discarding any stale per-category selections.
    pub fn generate_regimens<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        let chosen = patient
            .selected_pathway()
            .cloned()
            .ok_or(PlanError::NoPathwaySelected)?;
        let plan = self
            .advisor
            .detailed_regimens(&patient, &chosen)
            .map_err(|e| {
                warn!(patient = patient_id, error = %e, "regimen generation failed");
                e
            })?;
        patient.apply_detailed_plan(plan)?;
        store.update(patient)?;
        Ok(())
    }

    /// Override the regimen selection in one category.
    pub fn choose_regimen<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        category: RegimenCategory,
        regimen_id: &str,
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        patient.select_regimen(category, regimen_id)?;
        store.update(patient)?;
        Ok(())
    }

    /// Dose sheet for the patient's selected cycle regimens.
    pub fn dose_sheet<S: StoragePort>(
        &self,
        store: &PatientStore<S>,
        patient_id: &str,
    ) -> AssistantResult<Vec<DoseLine>> {
        let patient = store
            .get(patient_id)
            .ok_or_else(|| StoreError::UnknownPatient(patient_id.to_string()))?;
        Ok(dosage::dose_sheet(
            &patient.cycled_regimens(),
            patient.height,
            patient.weight,
        ))
    }

    /// Project a schedule preview; nothing is persisted.
    pub fn preview_schedule<S: StoragePort>(
        &self,
        store: &PatientStore<S>,
        patient_id: &str,
        start: NaiveDate,
    ) -> AssistantResult<SchedulePreview> {
        let patient = store
            .get(patient_id)
            .ok_or_else(|| StoreError::UnknownPatient(patient_id.to_string()))?;
        Ok(schedule::project_schedule(&patient.cycled_regimens(), start))
    }

    /// Append a previewed schedule to the patient timeline.
    pub fn commit_schedule<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        preview: SchedulePreview,
    ) -> AssistantResult<usize> {
        let mut patient = Self::patient(store, patient_id)?;
        let added = preview.commit(&mut patient);
        store.update(patient)?;
        Ok(added)
    }

    /// Add a single manually entered timeline event.
    pub fn add_event<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        date: NaiveDate,
        title: String,
        description: String,
        kind: EventKind,
    ) -> AssistantResult<String> {
        let mut patient = Self::patient(store, patient_id)?;
        let event = TreatmentEvent::new(date, title, description, kind);
        let event_id = event.id.clone();
        patient.add_event(event);
        store.update(patient)?;
        Ok(event_id)
    }

    /// Replace the side-effect labels recorded on one timeline event.
    pub fn record_side_effects<S: StoragePort>(
        &self,
        store: &mut PatientStore<S>,
        patient_id: &str,
        event_id: &str,
        labels: &[String],
    ) -> AssistantResult<()> {
        let mut patient = Self::patient(store, patient_id)?;
        if !patient.record_side_effects(event_id, labels) {
            return Err(AssistantError::UnknownEvent(event_id.to_string()));
        }
        store.update(patient)?;
        Ok(())
    }
}
