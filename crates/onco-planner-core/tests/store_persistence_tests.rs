//! End-to-end persistence tests for the patient store over file storage.

use onco_planner_core::models::{EventKind, Patient, TreatmentEvent};
use onco_planner_core::store::{JsonFileStorage, PatientStore};

fn storage(dir: &tempfile::TempDir) -> JsonFileStorage {
    JsonFileStorage::new(dir.path().join("patients.json"))
}

#[test]
fn first_run_seeds_and_persists_sample_data() {
    let dir = tempfile::tempdir().unwrap();

    let store = PatientStore::open(storage(&dir)).unwrap();
    assert_eq!(store.patients().len(), 2);

    // The seed is written immediately, so a second open reads it back
    let reopened = PatientStore::open(storage(&dir)).unwrap();
    assert_eq!(reopened.patients(), store.patients());
}

#[test]
fn added_patient_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = PatientStore::open(storage(&dir)).unwrap();
    let patient = Patient::new("王芳".into(), 50, "MZ2024001".into(), "右乳肿物".into());
    let id = patient.id.clone();
    store.add(patient).unwrap();

    let reopened = PatientStore::open(storage(&dir)).unwrap();
    assert_eq!(reopened.patients().len(), 3);
    assert_eq!(reopened.patients()[0].id, id);
    assert_eq!(reopened.patients(), store.patients());
}

#[test]
fn timeline_mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = PatientStore::open(storage(&dir)).unwrap();
    let mut patient = store.get("1").unwrap().clone();
    patient.add_event(TreatmentEvent::new(
        chrono::NaiveDate::from_ymd_opt(2023, 12, 13).unwrap(),
        "AC方案化疗 (C3)".into(),
        "第三次化疗".into(),
        EventKind::Medication,
    ));
    let recorded = patient.record_side_effects("t3", &["脱发".to_string(), "恶心呕吐 (CINV)".to_string()]);
    assert!(recorded);
    store.update(patient).unwrap();

    let reopened = PatientStore::open(storage(&dir)).unwrap();
    let loaded = reopened.get("1").unwrap();
    assert_eq!(loaded.timeline.len(), 5);
    let event = loaded.timeline.iter().find(|e| e.id == "t3").unwrap();
    assert_eq!(event.side_effects.len(), 2);
}

#[test]
fn ids_stay_distinct_across_many_adds() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PatientStore::open(storage(&dir)).unwrap();

    for i in 0..20 {
        store
            .add(Patient::new(format!("患者{i}"), 40 + i, format!("MZ{i:04}"), "诊断".into()))
            .unwrap();
    }

    let mut ids: Vec<&str> = store.patients().iter().map(|p| p.id.as_str()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}
