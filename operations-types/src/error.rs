//! Error types for the operations service.

/// Domain-level errors (invalid stored or supplied values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unknown transfer direction: {0}")]
    UnknownDirection(String),

    #[error("Unknown transfer status: {0}")]
    UnknownStatus(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Failures talking to a downstream collaborator (channel connector or
/// workflow engine).
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The collaborator could not be reached or missed the deadline.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered but refused the request.
    #[error("Upstream rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream rejected request with status {status}: {message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message shown to API callers.
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(DomainError::ValidationError(msg)) => AppError::BadRequest(msg),
            RepoError::Domain(e) => AppError::Internal(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unavailable(msg) => AppError::UpstreamUnavailable(msg),
            UpstreamError::Rejected { status, message } => {
                AppError::UpstreamRejected { status, message }
            }
        }
    }
}
