use crate::core::registry::Registry;
use crate::domain::model::{Assignment, Assignments, Doctor, Patient, RecordsDocument};
use crate::domain::ports::Storage;
use crate::utils::error::{HospitalError, Result};
use std::path::Path;

/// In-memory owner of patients, doctors and assignments, mirrored to the
/// backing document after every mutation.
///
/// Persistence failures never surface as errors: a failed load leaves the
/// store empty, a failed save leaves memory authoritative and flips
/// [`is_synced`](Self::is_synced) to false until the next successful save.
pub struct HospitalManagement<S: Storage> {
    storage: S,
    patients: Registry<Patient>,
    doctors: Registry<Doctor>,
    assignments: Assignments,
    synced: bool,
}

impl<S: Storage> HospitalManagement<S> {
    /// Creates the backing document if needed and loads it.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            patients: Registry::new(),
            doctors: Registry::new(),
            assignments: Assignments::new(),
            synced: true,
        };
        store.load();
        store
    }

    fn load(&mut self) {
        match self.read_document() {
            Ok(document) => {
                for patient in document.patients {
                    self.patients.upsert(patient);
                }
                for doctor in document.doctors {
                    self.doctors.upsert(doctor);
                }
                self.assignments = document.assignments;
                self.synced = true;
                tracing::info!(
                    "Loaded data from {} ({} patients, {} doctors, {} assignments)",
                    self.storage.location().display(),
                    self.patients.len(),
                    self.doctors.len(),
                    self.assignments.len()
                );
            }
            Err(e) => {
                tracing::error!("Load error: {}", e);
                self.patients = Registry::new();
                self.doctors = Registry::new();
                self.assignments = Assignments::new();
                self.synced = false;
            }
        }
    }

    fn read_document(&self) -> Result<RecordsDocument> {
        let empty = RecordsDocument::default().to_pretty_json()?;
        self.storage.ensure_initialized(&empty)?;
        let data = self.storage.read()?;
        RecordsDocument::from_slice(&data)
    }

    /// Writes all three collections. Returns whether the write succeeded.
    pub fn save(&mut self) -> bool {
        match self.write_document() {
            Ok(()) => {
                tracing::info!("Saved data to {}", self.storage.location().display());
                self.synced = true;
            }
            Err(e) => {
                tracing::error!("Save error: {}", e);
                self.synced = false;
            }
        }
        self.synced
    }

    fn write_document(&self) -> Result<()> {
        let document = RecordsDocument {
            patients: self.patients.iter().cloned().collect(),
            doctors: self.doctors.iter().cloned().collect(),
            assignments: self.assignments.clone(),
        };
        let data = document.to_pretty_json()?;
        self.storage.write(&data)
    }

    pub fn add_patient(
        &mut self,
        name: impl Into<String>,
        age: u32,
        patient_id: impl Into<String>,
        disease: impl Into<String>,
    ) -> Result<()> {
        let patient = Patient::new(name, age, patient_id, disease);
        if !self.patients.insert(patient.clone()) {
            tracing::warn!("Rejected duplicate patient {}", patient.patient_id());
            return Err(HospitalError::DuplicatePatient {
                id: patient.patient_id().to_string(),
            });
        }
        tracing::debug!("Added patient {}", patient.patient_id());
        self.save();
        Ok(())
    }

    pub fn add_doctor(
        &mut self,
        name: impl Into<String>,
        specialization: impl Into<String>,
        doctor_id: impl Into<String>,
    ) -> Result<()> {
        let doctor = Doctor::new(name, specialization, doctor_id);
        if !self.doctors.insert(doctor.clone()) {
            tracing::warn!("Rejected duplicate doctor {}", doctor.doctor_id());
            return Err(HospitalError::DuplicateDoctor {
                id: doctor.doctor_id().to_string(),
            });
        }
        tracing::debug!("Added doctor {}", doctor.doctor_id());
        self.save();
        Ok(())
    }

    /// Assigns a doctor, silently replacing any doctor the patient already had.
    pub fn assign_doctor(&mut self, patient_id: &str, doctor_id: &str) -> Result<()> {
        if !self.patients.contains(patient_id) {
            return Err(HospitalError::PatientNotFound {
                id: patient_id.to_string(),
            });
        }
        if !self.doctors.contains(doctor_id) {
            return Err(HospitalError::DoctorNotFound {
                id: doctor_id.to_string(),
            });
        }
        if let Some(previous) = self
            .assignments
            .assign(patient_id.to_string(), doctor_id.to_string())
        {
            tracing::debug!(
                "Patient {} reassigned from {} to {}",
                patient_id,
                previous,
                doctor_id
            );
        }
        self.save();
        Ok(())
    }

    pub fn discharge_patient(&mut self, patient_id: &str) -> Result<()> {
        let patient = self
            .patients
            .get_mut(patient_id)
            .ok_or_else(|| HospitalError::PatientNotFound {
                id: patient_id.to_string(),
            })?;
        patient.discharge();
        self.assignments.remove(patient_id);
        tracing::debug!("Discharged patient {}", patient_id);
        self.save();
        Ok(())
    }

    pub fn search_patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn search_doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.get(doctor_id)
    }

    pub fn assigned_doctor(&self, patient_id: &str) -> Option<&str> {
        self.assignments.get(patient_id)
    }

    /// One line per patient in insertion order, annotated with the assigned doctor.
    pub fn display_patients(&self) -> Vec<String> {
        self.patients
            .iter()
            .map(|p| {
                let doctor = self.assigned_doctor(p.patient_id()).unwrap_or("None");
                format!("{} | Assigned Doctor: {}", p, doctor)
            })
            .collect()
    }

    pub fn display_doctors(&self) -> Vec<String> {
        self.doctors.iter().map(|d| d.to_string()).collect()
    }

    pub fn list_assignments(&self) -> Vec<Assignment> {
        self.assignments.iter().cloned().collect()
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter()
    }

    pub fn data_file(&self) -> &Path {
        self.storage.location()
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }
}
