//! Error types for search operations

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while executing a search against a repository
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Search execution failed (engine unreachable, request rejected, ...)
    #[error("Search execution failed: {0}")]
    ExecutionFailed(String),

    /// Document source could not be loaded
    #[error("Document loading failed: {0}")]
    LoadFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::LoadFailed(err.to_string())
    }
}
