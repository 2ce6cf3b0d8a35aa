//! Patient records and clinical markers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::plan::{DetailedRegimenPlan, SelectedRegimens, TreatmentOption};
use super::timeline::TreatmentEvent;

/// Breast-cancer molecular classification used to steer plan generation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MolecularSubtype {
    #[serde(rename = "Luminal A")]
    LuminalA,
    #[serde(rename = "Luminal B")]
    LuminalB,
    #[serde(rename = "HER2 Positive")]
    Her2Positive,
    #[serde(rename = "Triple Negative")]
    TripleNegative,
    /// Pathology pending, subtype not yet determined
    #[default]
    #[serde(rename = "待定")]
    Unknown,
}

impl fmt::Display for MolecularSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MolecularSubtype::LuminalA => "Luminal A",
            MolecularSubtype::LuminalB => "Luminal B",
            MolecularSubtype::Her2Positive => "HER2 Positive",
            MolecularSubtype::TripleNegative => "Triple Negative",
            MolecularSubtype::Unknown => "待定",
        };
        f.write_str(label)
    }
}

/// Where the patient currently is in the treatment course.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreatmentStage {
    #[default]
    #[serde(rename = "初步诊断")]
    Diagnosis,
    #[serde(rename = "新辅助治疗")]
    Neoadjuvant,
    #[serde(rename = "手术")]
    Surgery,
    #[serde(rename = "辅助治疗")]
    Adjuvant,
    #[serde(rename = "随访")]
    FollowUp,
}

impl fmt::Display for TreatmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TreatmentStage::Diagnosis => "初步诊断",
            TreatmentStage::Neoadjuvant => "新辅助治疗",
            TreatmentStage::Surgery => "手术",
            TreatmentStage::Adjuvant => "辅助治疗",
            TreatmentStage::FollowUp => "随访",
        };
        f.write_str(label)
    }
}

/// Hormone/biomarker pathology findings.
///
/// Free text because clinical notation varies between labs; only the
/// menopause flag is structured.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalMarkers {
    /// Estrogen receptor, e.g. "强阳性 (90%)"
    pub er_status: String,
    /// Progesterone receptor
    pub pr_status: String,
    /// HER2 expression, e.g. "阴性 (1+)"
    pub her2_status: String,
    /// Proliferation index
    pub ki67: String,
    /// Clinical tumor size (cT)
    pub tumor_size: String,
    /// Clinical node status (cN)
    pub node_status: String,
    /// Whether the patient is post-menopausal
    pub menopause: bool,
}

/// A patient record with clinical markers, plan state and timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique record identifier, generated locally
    pub id: String,
    /// Patient name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Medical record number
    pub mrn: String,
    /// Date of admission
    pub admission_date: NaiveDate,
    /// Working diagnosis, e.g. "左乳浸润性导管癌"
    pub diagnosis: String,
    /// Molecular subtype
    pub subtype: MolecularSubtype,
    /// Current treatment stage
    pub stage: TreatmentStage,
    /// Pathology markers
    pub markers: ClinicalMarkers,
    /// Height in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Generated high-level pathway options
    #[serde(default)]
    pub treatment_options: Vec<TreatmentOption>,
    /// The pathway the doctor selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_plan_id: Option<String>,
    /// Generated per-category drug regimen options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_plan: Option<DetailedRegimenPlan>,
    /// The regimens the doctor selected, one per category
    #[serde(default)]
    pub selected_regimens: SelectedRegimens,
    /// Dated clinical events, owned exclusively by this record
    #[serde(default)]
    pub timeline: Vec<TreatmentEvent>,
}

impl Patient {
    /// Create a new patient with required fields.
    ///
    /// Admission date defaults to today; stage and subtype default to
    /// initial diagnosis / undetermined, as on the intake form.
    pub fn new(name: String, age: u32, mrn: String, diagnosis: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            age,
            mrn,
            admission_date: chrono::Utc::now().date_naive(),
            diagnosis,
            subtype: MolecularSubtype::default(),
            stage: TreatmentStage::default(),
            markers: ClinicalMarkers::default(),
            height: None,
            weight: None,
            treatment_options: Vec::new(),
            selected_plan_id: None,
            detailed_plan: None,
            selected_regimens: SelectedRegimens::default(),
            timeline: Vec::new(),
        }
    }

    /// Record measured height/weight when both values are valid.
    ///
    /// Returns whether the record changed, so the owner knows to persist.
    pub fn set_anthropometrics(&mut self, height_cm: f64, weight_kg: f64) -> bool {
        if !(height_cm > 0.0) || !(weight_kg > 0.0) {
            return false;
        }
        if self.height == Some(height_cm) && self.weight == Some(weight_kg) {
            return false;
        }
        self.height = Some(height_cm);
        self.weight = Some(weight_kg);
        true
    }

    /// Append a single manually entered event to the timeline.
    pub fn add_event(&mut self, event: TreatmentEvent) {
        self.timeline.push(event);
    }

    /// Replace the side-effect labels recorded on one timeline event.
    ///
    /// Returns false when no event has the given id.
    pub fn record_side_effects(&mut self, event_id: &str, labels: &[String]) -> bool {
        match self.timeline.iter_mut().find(|e| e.id == event_id) {
            Some(event) => {
                event.record_side_effects(labels);
                true
            }
            None => false,
        }
    }

    /// Whether the roster search term matches this patient (name or MRN).
    pub fn matches(&self, term: &str) -> bool {
        self.name.contains(term) || self.mrn.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_defaults() {
        let patient = Patient::new("王芳".into(), 50, "MZ2024001".into(), "右乳肿物".into());
        assert_eq!(patient.subtype, MolecularSubtype::Unknown);
        assert_eq!(patient.stage, TreatmentStage::Diagnosis);
        assert!(patient.timeline.is_empty());
        assert!(patient.selected_plan_id.is_none());
        assert_eq!(patient.id.len(), 36); // UUID format
    }

    #[test]
    fn test_set_anthropometrics_rejects_non_positive() {
        let mut patient = Patient::new("王芳".into(), 50, "MZ2024001".into(), "右乳肿物".into());
        assert!(!patient.set_anthropometrics(0.0, 58.0));
        assert!(!patient.set_anthropometrics(160.0, -1.0));
        assert!(patient.height.is_none());

        assert!(patient.set_anthropometrics(160.0, 58.0));
        assert_eq!(patient.height, Some(160.0));
        assert_eq!(patient.weight, Some(58.0));

        // Same pair again is a no-op
        assert!(!patient.set_anthropometrics(160.0, 58.0));
    }

    #[test]
    fn test_matches_by_name_or_mrn() {
        let patient = Patient::new("张晓红".into(), 45, "MZ20231001".into(), "诊断".into());
        assert!(patient.matches("晓红"));
        assert!(patient.matches("20231001"));
        assert!(!patient.matches("李"));
    }

    #[test]
    fn test_subtype_serializes_to_display_string() {
        let json = serde_json::to_string(&MolecularSubtype::Her2Positive).unwrap();
        assert_eq!(json, "\"HER2 Positive\"");
        let json = serde_json::to_string(&MolecularSubtype::Unknown).unwrap();
        assert_eq!(json, "\"待定\"");
    }
}
