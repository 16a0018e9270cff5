//! Mapping of domain errors onto GraphQL field errors.

use async_graphql::ErrorExtensions;
use pm_core::PmError;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const STORE_ERROR: &str = "STORE_ERROR";

/// Machine-readable code placed in `extensions.code`.
pub fn error_code(err: &PmError) -> &'static str {
    match err {
        PmError::ValidationError(_) => BAD_USER_INPUT,
        e if e.is_not_found() => NOT_FOUND,
        _ => STORE_ERROR,
    }
}

/// Convert a domain error into an error attached to the resolving field.
pub fn gql_error(err: &PmError) -> async_graphql::Error {
    let code = error_code(err);
    if code == STORE_ERROR {
        tracing::error!(error = %err, "Store operation failed");
    }
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_store::StoreError;

    #[test]
    fn test_codes() {
        assert_eq!(error_code(&PmError::validation("x")), BAD_USER_INPUT);
        assert_eq!(error_code(&PmError::ProjectNotFound("p".into())), NOT_FOUND);
        assert_eq!(error_code(&PmError::Store(StoreError::NotFound("p".into()))), NOT_FOUND);
        assert_eq!(
            error_code(&PmError::Store(StoreError::OperationFailed("boom".into()))),
            STORE_ERROR
        );
    }

    #[test]
    fn test_message_preserved() {
        let err = gql_error(&PmError::ProjectNotFound("p9".into()));
        assert_eq!(err.message, "Project not found: p9");
    }
}
