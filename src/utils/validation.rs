use crate::utils::error::{DesignCodeError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.display().to_string();
    if path.as_os_str().is_empty() {
        return Err(DesignCodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display,
            reason: "a path is required here".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(DesignCodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display,
            reason: "paths may not contain NUL characters".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DesignCodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("needs to be {} or more", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DesignCodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "needs some non-blank text".to_string(),
        });
    }
    Ok(())
}
