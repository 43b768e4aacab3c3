use anyhow::Result;
use hospital_records::{HospitalError, HospitalManagement, LocalStorage, Patient, PatientStatus};
use std::collections::HashSet;
use std::path::PathBuf;
use tempfile::TempDir;

fn records_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data").join("records.json")
}

/// Walks the admit → assign → discharge → duplicate scenario end to end.
#[test]
fn test_patient_lifecycle_scenario() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut store = HospitalManagement::open(LocalStorage::new(records_path(&temp_dir)));

    store.add_patient("Jane Doe", 34, "P1", "Flu")?;
    assert_eq!(
        store.search_patient("P1"),
        Some(&Patient::new("Jane Doe", 34, "P1", "Flu"))
    );

    store.add_doctor("Smith", "Cardiology", "D1")?;
    store.assign_doctor("P1", "D1")?;
    assert_eq!(
        store.display_patients(),
        vec!["P1 | Jane Doe | Age: 34 | Flu | Admitted | Assigned Doctor: D1"]
    );

    store.discharge_patient("P1")?;
    assert_eq!(store.search_patient("P1").unwrap().status, PatientStatus::Discharged);
    assert!(store.list_assignments().iter().all(|a| a.patient_id != "P1"));

    let err = store.add_patient("Jane Doe", 35, "P1", "Cold").unwrap_err();
    assert!(matches!(err, HospitalError::DuplicatePatient { .. }));
    let original = store.search_patient("P1").unwrap();
    assert_eq!(original.status, PatientStatus::Discharged);
    assert_eq!(original.disease, "Flu");

    Ok(())
}

#[test]
fn test_fresh_store_reproduces_saved_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = records_path(&temp_dir);

    {
        let mut store = HospitalManagement::open(LocalStorage::new(&path));
        store.add_patient("Jane Doe", 34, "P1", "Flu")?;
        store.add_patient("John Roe", 60, "P2", "Gout")?;
        store.add_patient("Ann Lee", 8, "P3", "Measles")?;
        store.add_doctor("Smith", "Cardiology", "D1")?;
        store.add_doctor("Jones", "Paediatrics", "D2")?;
        store.assign_doctor("P3", "D2")?;
        store.assign_doctor("P1", "D1")?;
        store.assign_doctor("P2", "D1")?;
        store.discharge_patient("P2")?;
        assert!(store.is_synced());
    }

    let reopened = HospitalManagement::open(LocalStorage::new(&path));

    let patients: HashSet<String> = reopened.patients().map(|p| p.to_string()).collect();
    let expected: HashSet<String> = [
        "P1 | Jane Doe | Age: 34 | Flu | Admitted",
        "P2 | John Roe | Age: 60 | Gout | Discharged",
        "P3 | Ann Lee | Age: 8 | Measles | Admitted",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(patients, expected);

    let doctors: HashSet<String> = reopened.doctors().map(|d| d.to_string()).collect();
    assert_eq!(doctors.len(), 2);
    assert!(doctors.contains("D2 | Dr. Jones | Paediatrics"));

    let assignments: Vec<String> = reopened
        .list_assignments()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(assignments, vec!["P3 -> D2", "P1 -> D1"]);

    Ok(())
}

#[test]
fn test_open_precreates_document_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = records_path(&temp_dir);

    let store = HospitalManagement::open(LocalStorage::new(&path));
    assert!(store.is_synced());
    assert_eq!(store.data_file(), path.as_path());

    let content: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(
        content,
        serde_json::json!({"patients": [], "doctors": [], "assignments": {}})
    );

    Ok(())
}

#[test]
fn test_document_layout_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = records_path(&temp_dir);

    let mut store = HospitalManagement::open(LocalStorage::new(&path));
    store.add_doctor("Smith", "Cardiology", "D1")?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("{\n    \"patients\": [],\n    \"doctors\": [\n        {\n"));
    assert!(content.contains("\"doctor_id\": \"D1\""));

    Ok(())
}

#[test]
fn test_malformed_file_falls_back_to_empty_and_is_overwritten() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = records_path(&temp_dir);
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, "{\"patients\": [{\"name\": \"X\"}]")?;

    let mut store = HospitalManagement::open(LocalStorage::new(&path));
    assert_eq!(store.patients().count(), 0);
    assert!(!store.is_synced());

    store.add_patient("Jane Doe", 34, "P1", "Flu")?;
    assert!(store.is_synced());

    let reopened = HospitalManagement::open(LocalStorage::new(&path));
    assert!(reopened.search_patient("P1").is_some());

    Ok(())
}

#[test]
fn test_legacy_document_with_numeric_ids_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("records.json");
    std::fs::write(
        &path,
        r#"{
    "patients": [{"name": "Sam", "age": "41", "patient_id": 101, "disease": "Asthma"}],
    "doctors": [{"name": "Smith", "specialization": "Cardiology", "doctor_id": 7}],
    "assignments": {"101": 7}
}"#,
    )?;

    let store = HospitalManagement::open(LocalStorage::new(&path));
    let patient = store.search_patient("101").unwrap();
    assert_eq!(patient.age, 41);
    assert!(patient.is_admitted());
    assert!(store.search_doctor("7").is_some());
    assert_eq!(store.assigned_doctor("101"), Some("7"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unwritable_location_reports_unsynced() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A directory where the data file should be makes every write fail.
    let path = temp_dir.path().join("records.json");
    std::fs::create_dir_all(&path)?;

    let mut store = HospitalManagement::open(LocalStorage::new(&path));
    assert!(!store.is_synced());

    store.add_patient("Jane Doe", 34, "P1", "Flu")?;
    assert!(!store.is_synced());
    assert!(store.search_patient("P1").is_some());

    Ok(())
}
