/// Error types for the statistics dashboard
use thiserror::Error;

/// Main error type for chart construction, fetching and rendering
#[derive(Error, Debug)]
pub enum StatsError {
    /// Chart was built without an endpoint path
    #[error("URL is not defined")]
    MissingEndpoint,

    /// Chart was built without a rendering strategy
    #[error("Chart type is not defined")]
    MissingChartType,

    /// Chart headers must be exactly two non-empty labels
    #[error("Chart headers are not defined")]
    MissingHeaders,

    /// `draw` was called before `mount` recorded a container
    #[error("Chart is not mounted into a container")]
    NotMounted,

    /// The server answered with an `errors` payload
    #[error("Server reported errors: {}", .0.join("; "))]
    Remote(Vec<String>),

    /// The server answered with something other than a label -> number object
    #[error("Invalid chart payload: {0}")]
    InvalidPayload(String),

    /// The HTTP request itself failed
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Type alias for Results using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

/// Where a failure came from, as far as the user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// The statistics endpoint answered, but with errors or an unusable body
    Server,
    /// The endpoint could not be reached
    Network,
    /// The dashboard itself is misconfigured
    Dashboard,
}

impl ErrorOrigin {
    pub fn heading(self) -> &'static str {
        match self {
            ErrorOrigin::Server => "The statistics service reported a problem",
            ErrorOrigin::Network => "Could not reach the statistics service",
            ErrorOrigin::Dashboard => "The chart could not be drawn",
        }
    }

    /// Only network failures are worth retrying unchanged.
    pub fn is_retryable(self) -> bool {
        self == ErrorOrigin::Network
    }
}

/// A failure as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub origin: ErrorOrigin,
    /// One line per reported error
    pub details: Vec<String>,
}

impl ErrorReport {
    pub fn new(origin: ErrorOrigin, detail: impl Into<String>) -> Self {
        Self {
            origin,
            details: vec![detail.into()],
        }
    }
}

impl From<&StatsError> for ErrorReport {
    fn from(err: &StatsError) -> Self {
        match err {
            StatsError::Remote(errors) if !errors.is_empty() => ErrorReport {
                origin: ErrorOrigin::Server,
                details: errors.clone(),
            },
            StatsError::Remote(_) | StatsError::InvalidPayload(_) => {
                ErrorReport::new(ErrorOrigin::Server, err.to_string())
            }
            StatsError::Transport(reason) => ErrorReport::new(ErrorOrigin::Network, reason.clone()),
            _ => ErrorReport::new(ErrorOrigin::Dashboard, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_listed_one_per_line() {
        let err = StatsError::Remote(vec!["Unknown group".to_string(), "Try later".to_string()]);
        let report = ErrorReport::from(&err);
        assert_eq!(report.origin, ErrorOrigin::Server);
        assert_eq!(report.details, vec!["Unknown group", "Try later"]);
        assert!(!report.origin.is_retryable());
    }

    #[test]
    fn test_transport_failure_is_retryable() {
        let err = StatsError::Transport("connection refused".to_string());
        let report = ErrorReport::from(&err);
        assert_eq!(report, ErrorReport::new(ErrorOrigin::Network, "connection refused"));
        assert!(report.origin.is_retryable());
    }

    #[test]
    fn test_other_failures() {
        let payload = ErrorReport::from(&StatsError::InvalidPayload("expected an object".to_string()));
        assert_eq!(payload.origin, ErrorOrigin::Server);
        assert_eq!(payload.details, vec!["Invalid chart payload: expected an object"]);

        let empty = ErrorReport::from(&StatsError::Remote(Vec::new()));
        assert_eq!(empty.details, vec!["Server reported errors: "]);

        let setup = ErrorReport::from(&StatsError::NotMounted);
        assert_eq!(setup.origin, ErrorOrigin::Dashboard);
        assert_eq!(setup.details, vec!["Chart is not mounted into a container"]);
    }
}
