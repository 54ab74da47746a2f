use sea_orm::error::DbErr;
use thiserror::Error;

/// Failure to open the database connection. Fatal to a session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid connection settings: {0}")]
    InvalidSettings(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Failure of a single metric query.
///
/// The gateway never propagates this; it is recorded on the empty [`Table`]
/// it returns so callers can tell a broken query from a query with no rows.
///
/// [`Table`]: crate::db::Table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Database not connected")]
    NotConnected,

    #[error("Query execution failed: {0}")]
    Execution(String),

    #[error("Result decoding failed: {0}")]
    Decode(String),
}

impl QueryError {
    pub fn execution(err: DbErr) -> Self {
        QueryError::Execution(err.to_string())
    }

    pub fn decode(err: DbErr) -> Self {
        QueryError::Decode(err.to_string())
    }
}

/// Failure while releasing the connection. Logged, never escalated.
#[derive(Debug, Error)]
#[error("Failed to release database resources: {0}")]
pub struct ResourceReleaseError(#[from] pub DbErr);

/// Failure to draw or save the dashboard image. Logged, the report is still written.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Chart backend error: {0}")]
    Backend(String),
}

/// Top-level error of an analytics session.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

impl AnalyticsError {
    /// Connection failures abort the session before any artifact is written.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, AnalyticsError::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_keeps_driver_message() {
        let err = QueryError::execution(DbErr::Custom("no such table: Orders".into()));
        let message = err.to_string();
        assert!(message.starts_with("Query execution failed: "));
        assert!(message.contains("no such table: Orders"));
    }

    #[test]
    fn connection_failures_are_flagged() {
        let err: AnalyticsError = ConnectionError::InvalidSettings("port".into()).into();
        assert!(err.is_connection_failure());
        assert!(!AnalyticsError::Unhandled("boom".into()).is_connection_failure());
    }

    #[test]
    fn cycle_failures_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: AnalyticsError = io.into();
        assert!(matches!(err, AnalyticsError::Io(_)));
        assert!(!err.is_connection_failure());

        let err: AnalyticsError = RenderError::Backend("font missing".into()).into();
        assert_eq!(
            err.to_string(),
            "Render error: Chart backend error: font missing"
        );
    }
}
