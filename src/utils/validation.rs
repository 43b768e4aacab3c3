use crate::utils::error::{HospitalError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HospitalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HospitalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(HospitalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Parses free-text age input. The store only ever sees a typed age, so this is
/// the one place malformed numeric input is rejected.
pub fn parse_age(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .map_err(|e| HospitalError::ValidationError {
            field: "age".to_string(),
            value: trimmed.to_string(),
            reason: format!("must be a non-negative integer ({})", e),
        })
}
