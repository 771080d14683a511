pub mod client;
pub mod error;


pub use client::GitHubClient;
pub use error::{GitHubError, Result};

// Re-export core types for convenience
pub use pulse_core::{ProfileBundle, PulseError, RateLimitInfo};
