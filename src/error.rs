use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A category page could not be fetched. Skips the category during a live build.
    #[error("Fetch error for '{category}': {reason}")]
    Fetch { category: String, reason: String },

    /// A single posting block lacked a required element.
    #[error("Malformed posting: {0}")]
    MalformedPosting(String),

    /// A persisted snapshot was missing, empty, or could not be parsed.
    #[error("Source unreadable '{}': {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for errors contained at category, posting, or source scope.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Fetch { .. }
                | AppError::MalformedPosting(_)
                | AppError::SourceUnreadable { .. }
        )
    }
}
