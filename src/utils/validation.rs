use crate::utils::error::{IntakeError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "file" => Ok(()),
            scheme => Err(IntakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Storage keys become file names, so they are limited to a safe alphabet.
pub fn validate_storage_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(IntakeError::storage(key, "keys may only contain [A-Za-z0-9_-]"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("app.page_url", "https://example.com").is_ok());
        assert!(validate_url("app.page_url", "http://example.com/calc").is_ok());
        assert!(validate_url("app.page_url", "").is_err());
        assert!(validate_url("app.page_url", "invalid-url").is_err());
        assert!(validate_url("app.page_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("theme").is_ok());
        assert!(validate_storage_key("waterCalculatorResults").is_ok());
        assert!(validate_storage_key("../etc/passwd").is_err());
        assert!(validate_storage_key("").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("app.default_weight", 70.0, 1.0, 300.0).is_ok());
        assert!(validate_range("app.default_weight", 0.5, 1.0, 300.0).is_err());
    }
}
