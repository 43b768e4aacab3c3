pub mod registry;
pub mod store;

pub use crate::domain::model::{Assignment, Assignments, Doctor, Patient, PatientStatus, RecordsDocument};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
