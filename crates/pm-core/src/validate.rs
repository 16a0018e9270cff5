//! Argument checks applied before any store call.

use crate::error::{PmError, PmResult};

/// Trim a required text argument, rejecting blank values.
pub fn required<'a>(field: &str, value: &'a str) -> PmResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PmError::validation(format!("'{}' must not be blank", field)));
    }
    Ok(trimmed)
}

/// Trim an optional text argument; `Some` values follow the `required` rule.
pub fn optional<'a>(field: &str, value: Option<&'a str>) -> PmResult<Option<&'a str>> {
    value.map(|v| required(field, v)).transpose()
}

pub fn email(value: &str) -> PmResult<&str> {
    let trimmed = required("email", value)?;
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(trimmed),
        _ => Err(PmError::validation(format!("'{}' is not an email address", trimmed))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Ada ").unwrap(), "Ada");
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = required("name", "   ").unwrap_err();
        assert!(matches!(err, PmError::ValidationError(_)));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("name", None).unwrap(), None);
        assert_eq!(optional("name", Some(" x ")).unwrap(), Some("x"));
        assert!(optional("name", Some("")).is_err());
    }

    #[test]
    fn test_email() {
        assert_eq!(email(" ada@example.com ").unwrap(), "ada@example.com");
        assert!(email("ada").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("ada@").is_err());
    }
}
