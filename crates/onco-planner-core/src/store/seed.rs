//! Built-in sample dataset used on first run.

use chrono::NaiveDate;

use crate::models::{
    ClinicalMarkers, EventKind, MolecularSubtype, Patient, SelectedRegimens, TreatmentEvent,
    TreatmentStage,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("static seed date")
}

fn event(id: &str, date: NaiveDate, title: &str, description: &str, completed: bool, kind: EventKind) -> TreatmentEvent {
    TreatmentEvent {
        id: id.into(),
        date,
        title: title.into(),
        description: description.into(),
        completed,
        kind,
        side_effects: Vec::new(),
    }
}

/// Two demonstration patients, one mid-treatment and one freshly admitted.
pub fn sample_patients() -> Vec<Patient> {
    let mut chemo_c1 = event(
        "t3",
        day(2023, 11, 1),
        "AC方案化疗 (C1)",
        "首次化疗",
        true,
        EventKind::Medication,
    );
    chemo_c1.side_effects = vec!["恶心呕吐 (CINV)".into()];

    vec![
        Patient {
            id: "1".into(),
            name: "张晓红".into(),
            age: 45,
            mrn: "MZ20231001".into(),
            admission_date: day(2023, 10, 1),
            diagnosis: "左乳浸润性导管癌".into(),
            subtype: MolecularSubtype::LuminalB,
            stage: TreatmentStage::Adjuvant,
            markers: ClinicalMarkers {
                er_status: "强阳性 (90%)".into(),
                pr_status: "阳性 (20%)".into(),
                her2_status: "阴性 (1+)".into(),
                ki67: "30%".into(),
                tumor_size: "2.5cm".into(),
                node_status: "N1".into(),
                menopause: false,
            },
            height: Some(160.0),
            weight: Some(58.0),
            treatment_options: Vec::new(),
            selected_plan_id: None,
            detailed_plan: None,
            selected_regimens: SelectedRegimens::default(),
            timeline: vec![
                event("t1", day(2023, 10, 5), "穿刺活检", "确诊浸润性导管癌", true, EventKind::Exam),
                event("t2", day(2023, 10, 12), "改良根治术", "手术顺利，出血50ml", true, EventKind::Surgery),
                chemo_c1,
                event("t4", day(2023, 11, 22), "AC方案化疗 (C2)", "计划第二次化疗", false, EventKind::Medication),
            ],
        },
        Patient {
            id: "2".into(),
            name: "李素芬".into(),
            age: 62,
            mrn: "MZ20231015".into(),
            admission_date: day(2023, 10, 15),
            diagnosis: "右乳肿物".into(),
            subtype: MolecularSubtype::Unknown,
            stage: TreatmentStage::Diagnosis,
            markers: ClinicalMarkers {
                er_status: "待查".into(),
                pr_status: "待查".into(),
                her2_status: "待查".into(),
                ki67: "待查".into(),
                tumor_size: "1.2cm".into(),
                node_status: "N0".into(),
                menopause: true,
            },
            height: None,
            weight: None,
            treatment_options: Vec::new(),
            selected_plan_id: None,
            detailed_plan: None,
            selected_regimens: SelectedRegimens::default(),
            timeline: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dataset_shape() {
        let patients = sample_patients();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].timeline.len(), 4);
        assert!(patients[1].timeline.is_empty());
        assert_eq!(patients[0].timeline[2].side_effects, vec!["恶心呕吐 (CINV)".to_string()]);
    }

    #[test]
    fn test_sample_dataset_round_trips() {
        let patients = sample_patients();
        let json = serde_json::to_string(&patients).unwrap();
        let back: Vec<Patient> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patients);
    }
}
