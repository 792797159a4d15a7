use thiserror::Error;

/// Top-level server errors, used by the bootstrap path
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Startup error: {0}")]
    Startup(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the bootstrap path
pub type Result<T> = std::result::Result<T, ServerError>;
