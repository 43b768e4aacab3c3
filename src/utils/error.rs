use thiserror::Error;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on {field} ('{value}'): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Patient ID already exists: {id}")]
    DuplicatePatient { id: String },

    #[error("Doctor ID already exists: {id}")]
    DuplicateDoctor { id: String },

    #[error("Patient not found: {id}")]
    PatientNotFound { id: String },

    #[error("Doctor not found: {id}")]
    DoctorNotFound { id: String },
}

impl HospitalError {
    /// Short one-line message for the interactive menu.
    pub fn user_friendly_message(&self) -> String {
        match self {
            HospitalError::DuplicatePatient { .. } => "Patient ID already exists.".to_string(),
            HospitalError::DuplicateDoctor { .. } => "Doctor ID already exists.".to_string(),
            HospitalError::PatientNotFound { .. } => "Patient not found.".to_string(),
            HospitalError::DoctorNotFound { .. } => "Doctor not found.".to_string(),
            HospitalError::ValidationError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            HospitalError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    /// True for the failures an add/assign/discharge reports without touching state.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            HospitalError::DuplicatePatient { .. }
                | HospitalError::DuplicateDoctor { .. }
                | HospitalError::PatientNotFound { .. }
                | HospitalError::DoctorNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HospitalError>;
