use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(err.into())
    }
}

#[derive(ThisError, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Pool initialization failed: {0}")]
    PoolInit(#[source] sqlx::Error),

    #[error("Timed out waiting for a pooled connection")]
    PoolTimeout,

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolTimeout,
            _ => DatabaseError::Query(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_conversion() {
        let db_err: DatabaseError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(db_err, DatabaseError::PoolTimeout));

        let db_err: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(matches!(db_err, DatabaseError::Query(_)));

        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::PoolTimeout)
        ));
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::Database(DatabaseError::PoolTimeout);
        assert_eq!(
            err.to_string(),
            "Database error: Timed out waiting for a pooled connection"
        );

        let err = Error::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }
}
