use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The `advocates` table does not exist yet.
    #[error("Advocates table is missing, run `diesel migration run` first")]
    MissingSchema,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_message(kind: &DatabaseErrorKind, message: &str) -> Option<String> {
    match kind {
        DatabaseErrorKind::CheckViolation if message.contains("years_of_experience") => {
            Some("years of experience must not be negative".to_string())
        }
        DatabaseErrorKind::CheckViolation => Some(format!("advocate rejected: {message}")),
        DatabaseErrorKind::NotNullViolation => {
            Some(format!("advocate is missing a required field: {message}"))
        }
        DatabaseErrorKind::UniqueViolation => {
            Some(format!("advocate already stored: {message}"))
        }
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => {
                let message = info.message();
                if let Some(violation) = constraint_message(&kind, message) {
                    RepositoryError::ConstraintViolation(violation)
                } else if message.starts_with("no such table") {
                    RepositoryError::MissingSchema
                } else {
                    RepositoryError::DatabaseError(message.to_string())
                }
            }

            DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("stored advocate is unreadable: {e}"))
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn negative_experience_is_named() {
        let err = RepositoryError::from(db_error(
            DatabaseErrorKind::CheckViolation,
            "CHECK constraint failed: years_of_experience >= 0",
        ));
        assert!(matches!(
            err,
            RepositoryError::ConstraintViolation(ref message)
                if message == "years of experience must not be negative"
        ));
    }

    #[test]
    fn missing_column_value_is_a_constraint_violation() {
        let err = RepositoryError::from(db_error(
            DatabaseErrorKind::NotNullViolation,
            "NOT NULL constraint failed: advocates.city",
        ));
        assert!(err.to_string().contains("advocates.city"));
        assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    }

    #[test]
    fn unmigrated_database_is_reported() {
        let err = RepositoryError::from(db_error(
            DatabaseErrorKind::Unknown,
            "no such table: advocates",
        ));
        assert!(matches!(err, RepositoryError::MissingSchema));
        assert!(err.to_string().contains("diesel migration run"));
    }

    #[test]
    fn other_database_errors_keep_their_message() {
        let err = RepositoryError::from(db_error(DatabaseErrorKind::Unknown, "disk I/O error"));
        assert!(matches!(err, RepositoryError::DatabaseError(ref m) if m == "disk I/O error"));
    }

    #[test]
    fn rolled_back_transaction_is_unexpected() {
        let err = RepositoryError::from(DieselError::RollbackTransaction);
        assert!(matches!(err, RepositoryError::Unexpected(_)));
    }
}
