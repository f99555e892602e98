use super::models::error::{DomainError, DomainResult};

pub const MAX_NAME_LENGTH: usize = 100;

/// Trim a display name and check it is non-empty and at most 100 characters
pub fn validate_name(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::invalid(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Colors are `#RRGGBB` hex strings
pub fn validate_color(value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    let valid = trimmed.len() == 7
        && trimmed.starts_with('#')
        && trimmed[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(DomainError::invalid(format!(
            "Color must look like #RRGGBB, got '{}'",
            value
        )));
    }
    Ok(trimmed.to_string())
}
