use pulse_core::PulseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for PulseError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => PulseError::Http(e.to_string()),
            GitHubError::Parse(e) => PulseError::Parse(e.to_string()),
            GitHubError::Io(e) => PulseError::Io(e.to_string()),
            GitHubError::UserNotFound(login) => PulseError::UserNotFound(login),
            GitHubError::RepositoryNotFound(name) => PulseError::RepositoryNotFound(name),
            GitHubError::Unauthorized => PulseError::Unauthorized,
            GitHubError::RateLimited => PulseError::RateLimited,
            GitHubError::Api { status, message } => PulseError::Api { status, message },
        }
    }
}
