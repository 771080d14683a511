pub mod compare;
pub mod history;
pub mod limits;
pub mod login;
pub mod profile;
pub mod release;
pub mod team;

use anyhow::{Context, Result};
use github_client::GitHubClient;

use crate::config::Config;

/// Construct the API client. A held token is resolved up front so later
/// lookups can detect "this is me" and route through the authenticated
/// endpoints.
pub fn build_client(config: &Config) -> Result<GitHubClient> {
    let mut client = GitHubClient::with_base_url(config.api_url(), config.token.as_deref());
    if client.is_authenticated() {
        client
            .authenticate()
            .context("Stored token was rejected; run 'pulse login' or pass a fresh --token")?;
    }
    Ok(client)
}
