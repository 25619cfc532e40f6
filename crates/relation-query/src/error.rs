//! Error types.

use thiserror::Error;

/// Errors raised by the host repository services.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("repository backend error")]
    Backend(#[from] anyhow::Error),
}

impl RepositoryError {
    /// Shorthand for a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Errors raised by the host search service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("search backend error")]
    Backend(#[from] anyhow::Error),
}

/// Errors surfaced by the query type handlers.
///
/// Source content lookup failures never show up here; they degrade to an
/// empty result instead.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("search failed")]
    Search(#[from] SearchError),

    #[error("repository lookup failed")]
    Repository(#[from] RepositoryError),
}

/// Result type alias using HandlerError.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid query type declarations")]
    Declarations(#[from] serde_yml::Error),
}
