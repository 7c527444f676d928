use thiserror::Error;

#[derive(Debug, Error)]
pub enum PgrestError {
    /// Malformed filter, criterion of the wrong shape, or operator misuse
    #[error("Usage error: {0}")]
    Usage(String),

    /// A record's primary key was null where one is required
    #[error("Record for table `{table}` has no primary key value")]
    MissingPrimaryKey { table: &'static str },

    /// Connection, DNS or timeout failure from the underlying transport
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-2xx status
    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Response body does not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `Content-Range` header absent or unparseable
    #[error("Invalid Content-Range: {0}")]
    InvalidContentRange(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PgrestError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[inline]
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    #[inline]
    pub fn is_forbidden(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    #[inline]
    pub fn is_not_acceptable(&self) -> bool {
        self.status() == Some(406)
    }

    #[inline]
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

/// Result type for query building and dispatch
pub type Result<T> = std::result::Result<T, PgrestError>;
