use crate::utils::error::Result;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    Admitted,
    Discharged,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Admitted => f.write_str("Admitted"),
            PatientStatus::Discharged => f.write_str("Discharged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    #[serde(deserialize_with = "deserialize_age")]
    pub age: u32,
    #[serde(deserialize_with = "deserialize_id")]
    patient_id: String,
    pub disease: String,
    #[serde(default)]
    pub status: PatientStatus,
}

impl Patient {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        patient_id: impl Into<String>,
        disease: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            patient_id: patient_id.into(),
            disease: disease.into(),
            status: PatientStatus::Admitted,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn admit(&mut self) {
        self.status = PatientStatus::Admitted;
    }

    pub fn discharge(&mut self) {
        self.status = PatientStatus::Discharged;
    }

    pub fn is_admitted(&self) -> bool {
        self.status == PatientStatus::Admitted
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | Age: {} | {} | {}",
            self.patient_id, self.name, self.age, self.disease, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub specialization: String,
    #[serde(deserialize_with = "deserialize_id")]
    doctor_id: String,
}

impl Doctor {
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
        doctor_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specialization: specialization.into(),
            doctor_id: doctor_id.into(),
        }
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Dr. {} | {}", self.doctor_id, self.name, self.specialization)
    }
}

/// One entry of the patient → doctor relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub patient_id: String,
    pub doctor_id: String,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.patient_id, self.doctor_id)
    }
}

/// Functional patient → doctor relation in insertion order.
///
/// Reassigning a patient keeps its position; removing and assigning again
/// moves it to the end. Serialized as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    entries: Vec<Assignment>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, patient_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.patient_id == patient_id)
            .map(|a| a.doctor_id.as_str())
    }

    /// Sets the doctor for a patient, returning the doctor it replaced.
    pub fn assign(&mut self, patient_id: String, doctor_id: String) -> Option<String> {
        match self.entries.iter_mut().find(|a| a.patient_id == patient_id) {
            Some(existing) => Some(std::mem::replace(&mut existing.doctor_id, doctor_id)),
            None => {
                self.entries.push(Assignment {
                    patient_id,
                    doctor_id,
                });
                None
            }
        }
    }

    pub fn remove(&mut self, patient_id: &str) -> Option<String> {
        let index = self.entries.iter().position(|a| a.patient_id == patient_id)?;
        Some(self.entries.remove(index).doctor_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Assignments {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.patient_id, &entry.doctor_id)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Assignments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AssignmentsVisitor;

        impl<'de> Visitor<'de> for AssignmentsVisitor {
            type Value = Assignments;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of patient_id to doctor_id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Assignments, A::Error> {
                let mut assignments = Assignments::new();
                while let Some((patient_id, CoercedId(doctor_id))) =
                    access.next_entry::<String, CoercedId>()?
                {
                    assignments.assign(patient_id, doctor_id);
                }
                Ok(assignments)
            }
        }

        deserializer.deserialize_map(AssignmentsVisitor)
    }
}

/// The backing document: every collection the store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsDocument {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub assignments: Assignments,
}

impl RecordsDocument {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Pretty-printed with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

struct CoercedId(String);

impl<'de> Deserialize<'de> for CoercedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_id(deserializer).map(CoercedId)
    }
}

// Identifiers written as JSON numbers are kept in their string form.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric identifier, found {}",
            other
        ))),
    }
}

fn deserialize_age<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("age must be a non-negative integer, found {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| de::Error::custom(format!("age '{}' is not an integer: {}", s, e))),
        other => Err(de::Error::custom(format!(
            "age must be an integer, found {}",
            other
        ))),
    }
}
