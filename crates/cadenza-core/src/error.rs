use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A cache artifact exists but does not hold the expected payload.
    #[error("malformed artifact {key}: {message}")]
    Malformed { key: String, message: String },

    /// The input is well-formed but too thin to derive a number from
    /// (empty track list, zero successful lookups, ...).
    #[error("not enough data: {0}")]
    DegenerateInput(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Returns `true` for a missing entity or artifact.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when a read should fall back to a fresh fetch.
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Malformed { .. })
    }

    /// Returns `true` for an artifact that exists but cannot be read.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
