//! Error types for service clients and the fetch-or-load orchestrator.

use thiserror::Error;

/// Errors that can occur while fetching, caching or deriving data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An HTTP request to an external service failed or returned an error
    /// status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The requested entity does not exist at the external service.
    #[error("not found: {entity} at {source_name}")]
    NotFound { entity: String, source_name: String },

    /// A response from an external service could not be parsed or did not
    /// have the expected shape.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// The caller passed something unusable (e.g. a blank artist name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error from the cache store or a derivation.
    #[error(transparent)]
    Core(#[from] cadenza_core::Error),
}

impl FetchError {
    pub(crate) fn http(source_name: &str, message: impl ToString) -> Self {
        Self::Http {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(source_name: &str, message: impl ToString) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn not_found(entity: impl Into<String>, source_name: &str) -> Self {
        Self::NotFound {
            entity: entity.into(),
            source_name: source_name.to_string(),
        }
    }

    /// Returns `true` when the error indicates the entity was not found,
    /// remotely or locally.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Core(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns `true` for network and response-format failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Parse { .. } | Self::Request(_)
        )
    }

    /// Returns `true` for a cached artifact that exists but cannot be read.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_malformed())
    }

    /// Returns `true` when there was too little data to compute a result.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_degenerate())
    }
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(FetchError::not_found("Adele", "Wikipedia").is_not_found());
        assert!(FetchError::http("catalog", "500").is_transport());
        assert!(FetchError::parse("catalog", "eof").is_transport());
        assert!(!FetchError::InvalidInput("x".to_string()).is_transport());

        let degenerate = FetchError::from(cadenza_core::Error::DegenerateInput("x".to_string()));
        assert!(degenerate.is_degenerate());
        assert!(!degenerate.is_not_found());

        let malformed = FetchError::from(cadenza_core::Error::Malformed {
            key: "registry".to_string(),
            message: "eof".to_string(),
        });
        assert!(malformed.is_malformed());
        assert!(!malformed.is_transport());
    }

    #[test]
    fn test_display() {
        let err = FetchError::not_found("Adele", "Wikipedia");
        assert_eq!(err.to_string(), "not found: Adele at Wikipedia");
    }
}
