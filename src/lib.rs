pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::menu::Menu;
pub use config::AppConfig;
pub use crate::core::store::HospitalManagement;
pub use domain::model::{Assignment, Doctor, Patient, PatientStatus};
pub use utils::error::{HospitalError, Result};
