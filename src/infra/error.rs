use thiserror::Error;

/// Startup failures of the adapters. The underlying error stays reachable
/// through `source()` so the full chain can be reported.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to bind the http listener")]
    Bind(#[from] std::io::Error),
    #[error("failed to connect to the database")]
    Database(#[from] sqlx::Error),
    #[error("failed to apply database migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to install the tracing subscriber")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("`database.url` is required to run migrations")]
    MissingDatabaseUrl,
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use axum::http::StatusCode;

    use super::*;
    use crate::application::error::ErrorReport;

    #[test]
    fn database_failures_keep_their_cause() {
        let err = InfraError::from(sqlx::Error::PoolTimedOut);
        let report = ErrorReport::from_error("tests", StatusCode::SERVICE_UNAVAILABLE, &err);

        assert!(err.source().is_some());
        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.messages[0], "failed to connect to the database");
        assert_eq!(report.messages[1], sqlx::Error::PoolTimedOut.to_string());
    }

    #[test]
    fn migration_failures_keep_their_cause() {
        let err = InfraError::from(sqlx::migrate::MigrateError::Execute(
            sqlx::Error::PoolTimedOut,
        ));

        assert!(matches!(err, InfraError::Migrate(_)));
        let source = err.source().expect("migrate error is the source");
        assert!(source.to_string().contains("pool timed out"));
    }
}
