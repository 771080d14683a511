//! OAuth authorization helpers: building the redirect, generating and
//! verifying the `state` parameter, and parsing the pasted callback.
//!
//! The token exchange itself happens in the companion proxy service, which is
//! the only place the client secret lives.

use rand::RngCore;

use crate::error::{PulseError, Result};

pub const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
/// Scopes requested for profile analytics, including private-repo counts
pub const DEFAULT_SCOPE: &str = "read:user,repo,read:org";

/// Parameters for one authorization redirect
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub state: String,
}

impl AuthorizeRequest {
    /// New request with the default scope and a fresh random state
    pub fn new(client_id: &str, redirect_uri: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            state: generate_state(),
        }
    }

    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&scope={}&state={}&allow_signup=true",
            GITHUB_AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scope),
            urlencoding::encode(&self.state),
        )
    }
}

/// 32 random bytes, hex-encoded, for the `state` parameter
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Reject a callback whose state does not match the one issued before the
/// redirect. A mismatch is a security-relevant abort and is never retried.
pub fn verify_state(expected: &str, received: &str) -> Result<()> {
    if expected == received {
        Ok(())
    } else {
        Err(PulseError::OAuthStateMismatch)
    }
}

/// Extract `code` and `state` from a pasted redirect URL or raw query string
pub fn parse_callback(input: &str) -> Result<(String, String)> {
    let input = input.trim();
    let query = input.split_once('?').map(|(_, q)| q).unwrap_or(input);
    let query = query.split('#').next().unwrap_or(query);

    let mut code = None;
    let mut state = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map_err(|e| PulseError::Parse(e.to_string()))?
            .into_owned();
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            _ => {}
        }
    }

    match (code, state) {
        (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => Ok((code, state)),
        _ => Err(PulseError::Parse(
            "callback is missing code or state".to_string(),
        )),
    }
}
