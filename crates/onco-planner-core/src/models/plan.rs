//! Treatment pathways and drug regimens suggested by the advisor.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// High-level pathway kind, drives the option icon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PathwayKind {
    Surgery,
    Chemo,
    Drug,
    Observation,
}

/// A high-level treatment pathway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentOption {
    /// Option identifier, unique within one generation
    pub id: String,
    /// Short pathway title
    pub title: String,
    /// Pathway kind
    #[serde(rename = "iconType")]
    pub kind: PathwayKind,
    /// One-paragraph rationale
    pub description: String,
    /// Expected duration, free text
    #[serde(default)]
    pub duration: String,
    /// Arguments for this pathway
    #[serde(default)]
    pub pros: Vec<String>,
    /// Arguments against this pathway
    #[serde(default)]
    pub cons: Vec<String>,
    /// Guideline-recommended flag; at most one option per generation is
    /// expected to carry it, but the remote service does not guarantee that
    pub recommended: bool,
}

/// Regimen categories, a closed set with display metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RegimenCategory {
    Chemo,
    Endocrine,
    Target,
    Immune,
}

impl RegimenCategory {
    pub const ALL: [RegimenCategory; 4] = [
        RegimenCategory::Chemo,
        RegimenCategory::Endocrine,
        RegimenCategory::Target,
        RegimenCategory::Immune,
    ];

    /// Display label used on schedules and dose sheets.
    pub fn label(self) -> &'static str {
        match self {
            RegimenCategory::Chemo => "化疗",
            RegimenCategory::Endocrine => "内分泌治疗",
            RegimenCategory::Target => "靶向治疗",
            RegimenCategory::Immune => "免疫治疗",
        }
    }

    /// Calendar color tag.
    pub fn color_tag(self) -> &'static str {
        match self {
            RegimenCategory::Chemo => "red",
            RegimenCategory::Endocrine => "orange",
            RegimenCategory::Target => "purple",
            RegimenCategory::Immune => "green",
        }
    }

    /// Whether regimens in this category run on a cycle calendar.
    ///
    /// Endocrine therapy is continuous daily medication and is excluded
    /// from cycle scheduling and dose calculation.
    pub fn is_cycled(self) -> bool {
        !matches!(self, RegimenCategory::Endocrine)
    }
}

impl fmt::Display for RegimenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegimenCategory::Chemo => "chemo",
            RegimenCategory::Endocrine => "endocrine",
            RegimenCategory::Target => "target",
            RegimenCategory::Immune => "immune",
        };
        f.write_str(name)
    }
}

/// Dosing basis for a drug: scaled by body-surface-area, scaled by body
/// weight, or a fixed amount.
///
/// Round-trips through the wire strings the generation service is told to
/// use ("mg/m2", "mg/kg", or anything else for fixed dosing such as "mg"
/// or "AUC").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoseUnit {
    /// mg per m² of body surface area
    PerSquareMeter,
    /// mg per kg of body weight
    PerKilogram,
    /// Fixed dose, raw unit text preserved
    Fixed(String),
}

impl DoseUnit {
    /// Classify a raw unit string from the wire.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "mg/m²" | "mg/m2" => DoseUnit::PerSquareMeter,
            "mg/kg" => DoseUnit::PerKilogram,
            other => DoseUnit::Fixed(other.to_string()),
        }
    }

    /// Canonical unit text for display and serialization.
    pub fn as_str(&self) -> &str {
        match self {
            DoseUnit::PerSquareMeter => "mg/m²",
            DoseUnit::PerKilogram => "mg/kg",
            DoseUnit::Fixed(raw) => raw,
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DoseUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DoseUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DoseUnit::parse(&raw))
    }
}

/// One drug inside a regimen with its standard dose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrugDetail {
    /// Drug name, e.g. "多西他赛 (Docetaxel)"
    pub name: String,
    /// Standard dose magnitude in the given unit
    pub standard_dose: f64,
    /// Dosing basis
    pub unit: DoseUnit,
}

/// A detailed, categorized treatment regimen, e.g. "AC-T".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegimenOption {
    /// Regimen identifier, unique within one generation
    pub id: String,
    /// Regimen shorthand, e.g. "AC-T"
    pub name: String,
    /// Drug composition summary
    pub description: String,
    /// Cycle shorthand for display, e.g. "q3w x 4"
    #[serde(default, rename = "cycle")]
    pub cycle_text: String,
    /// Regimen category
    #[serde(rename = "type")]
    pub category: RegimenCategory,
    /// Guideline-recommended flag
    pub recommended: bool,
    /// Drugs in this regimen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drugs: Vec<DrugDetail>,
    /// Total number of cycles, e.g. 4 or 6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cycles: Option<u32>,
    /// Days between cycle starts, e.g. 14 or 21
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<u32>,
}

/// Per-category regimen options for one chosen pathway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRegimenPlan {
    #[serde(default)]
    pub chemo_options: Vec<RegimenOption>,
    #[serde(default)]
    pub endocrine_options: Vec<RegimenOption>,
    #[serde(default)]
    pub target_options: Vec<RegimenOption>,
    #[serde(default)]
    pub immune_options: Vec<RegimenOption>,
}

impl DetailedRegimenPlan {
    /// Options in one category.
    pub fn options_for(&self, category: RegimenCategory) -> &[RegimenOption] {
        match category {
            RegimenCategory::Chemo => &self.chemo_options,
            RegimenCategory::Endocrine => &self.endocrine_options,
            RegimenCategory::Target => &self.target_options,
            RegimenCategory::Immune => &self.immune_options,
        }
    }

    /// Find a regimen by category and id.
    pub fn find(&self, category: RegimenCategory, id: &str) -> Option<&RegimenOption> {
        self.options_for(category).iter().find(|r| r.id == id)
    }

    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        RegimenCategory::ALL
            .iter()
            .all(|&c| self.options_for(c).is_empty())
    }
}

/// Sparse per-category regimen selection; each key is independently
/// optional and independently overridable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRegimens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endocrine_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immune_id: Option<String>,
}

impl SelectedRegimens {
    /// Selected regimen id in one category.
    pub fn get(&self, category: RegimenCategory) -> Option<&str> {
        match category {
            RegimenCategory::Chemo => self.chemo_id.as_deref(),
            RegimenCategory::Endocrine => self.endocrine_id.as_deref(),
            RegimenCategory::Target => self.target_id.as_deref(),
            RegimenCategory::Immune => self.immune_id.as_deref(),
        }
    }

    /// Override the selection in one category without touching the others.
    pub fn set(&mut self, category: RegimenCategory, id: String) {
        let slot = match category {
            RegimenCategory::Chemo => &mut self.chemo_id,
            RegimenCategory::Endocrine => &mut self.endocrine_id,
            RegimenCategory::Target => &mut self.target_id,
            RegimenCategory::Immune => &mut self.immune_id,
        };
        *slot = Some(id);
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        *self = SelectedRegimens::default();
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        RegimenCategory::ALL.iter().all(|&c| self.get(c).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dose_unit_parse() {
        assert_eq!(DoseUnit::parse("mg/m²"), DoseUnit::PerSquareMeter);
        assert_eq!(DoseUnit::parse("mg/m2"), DoseUnit::PerSquareMeter);
        assert_eq!(DoseUnit::parse("mg/kg"), DoseUnit::PerKilogram);
        assert_eq!(DoseUnit::parse("mg"), DoseUnit::Fixed("mg".into()));
        assert_eq!(DoseUnit::parse("AUC"), DoseUnit::Fixed("AUC".into()));
    }

    #[test]
    fn test_dose_unit_round_trip() {
        let drug = DrugDetail {
            name: "卡铂 (Carboplatin)".into(),
            standard_dose: 5.0,
            unit: DoseUnit::Fixed("AUC".into()),
        };
        let json = serde_json::to_string(&drug).unwrap();
        assert!(json.contains("\"unit\":\"AUC\""));
        let back: DrugDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(back, drug);
    }

    #[test]
    fn test_regimen_wire_format() {
        let json = r#"{
            "id": "r1",
            "name": "AC-T",
            "description": "阿霉素 + 环磷酰胺，序贯紫杉醇",
            "cycle": "q3w x 4",
            "type": "chemo",
            "recommended": true,
            "drugs": [{"name": "阿霉素", "standardDose": 60, "unit": "mg/m2"}],
            "totalCycles": 4,
            "frequencyDays": 21
        }"#;
        let regimen: RegimenOption = serde_json::from_str(json).unwrap();
        assert_eq!(regimen.category, RegimenCategory::Chemo);
        assert_eq!(regimen.total_cycles, Some(4));
        assert_eq!(regimen.drugs[0].unit, DoseUnit::PerSquareMeter);
    }

    #[test]
    fn test_regimen_optional_fields_default() {
        let json = r#"{"id":"e1","name":"TAM","description":"他莫昔芬","type":"endocrine","recommended":false}"#;
        let regimen: RegimenOption = serde_json::from_str(json).unwrap();
        assert!(regimen.drugs.is_empty());
        assert_eq!(regimen.total_cycles, None);
        assert_eq!(regimen.frequency_days, None);
        assert_eq!(regimen.cycle_text, "");
    }

    #[test]
    fn test_selected_regimens_independent_overrides() {
        let mut selection = SelectedRegimens::default();
        assert!(selection.is_empty());

        selection.set(RegimenCategory::Chemo, "c1".into());
        selection.set(RegimenCategory::Target, "t1".into());
        selection.set(RegimenCategory::Chemo, "c2".into());

        assert_eq!(selection.get(RegimenCategory::Chemo), Some("c2"));
        assert_eq!(selection.get(RegimenCategory::Target), Some("t1"));
        assert_eq!(selection.get(RegimenCategory::Endocrine), None);
    }

    #[test]
    fn test_plan_lookup() {
        let plan = DetailedRegimenPlan {
            chemo_options: vec![RegimenOption {
                id: "c1".into(),
                name: "TC".into(),
                description: "多西他赛 + 环磷酰胺".into(),
                cycle_text: "q3w x 4".into(),
                category: RegimenCategory::Chemo,
                recommended: true,
                drugs: Vec::new(),
                total_cycles: Some(4),
                frequency_days: Some(21),
            }],
            ..Default::default()
        };
        assert!(!plan.is_empty());
        assert!(plan.find(RegimenCategory::Chemo, "c1").is_some());
        assert!(plan.find(RegimenCategory::Endocrine, "c1").is_none());
        assert!(DetailedRegimenPlan::default().is_empty());
    }
}
