use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub OAuth App client id
    pub client_id: String,
    /// GitHub OAuth App client secret; never leaves this service
    pub client_secret: String,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL for the OAuth token endpoint (overridable for tests)
    pub oauth_base_url: String,
    /// Base URL for the REST API (overridable for tests)
    pub api_base_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingEnvVar(&'static str),
    InvalidValue(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => write!(f, "missing required environment variable {}", name),
            Self::InvalidValue(name) => write!(f, "invalid value for environment variable {}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = env::var("GITHUB_CLIENT_ID")
            .map_err(|_| ConfigError::MissingEnvVar("GITHUB_CLIENT_ID"))?;

        let client_secret = env::var("GITHUB_CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("GITHUB_CLIENT_SECRET"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let oauth_base_url =
            env::var("GITHUB_OAUTH_URL").unwrap_or_else(|_| "https://github.com".to_string());

        let api_base_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

        Ok(Self {
            client_id,
            client_secret,
            host,
            port,
            oauth_base_url,
            api_base_url,
        })
    }
}
