use thiserror::Error;

/// Common errors across the analytics core and its collaborators
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("OAuth state mismatch")]
    OAuthStateMismatch,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, PulseError>;
