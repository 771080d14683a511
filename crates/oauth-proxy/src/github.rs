//! Blocking upstream calls to GitHub, run inside `web::block` by the handlers.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

/// Successful token exchange payload returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
}

/// Raw token-endpoint answer; GitHub reports failures in a 200 body
#[derive(Debug, Deserialize)]
struct ExchangeBody {
    access_token: Option<String>,
    token_type: Option<String>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for an access token using the server-held
/// client secret
pub fn exchange_code(agent: &ureq::Agent, config: &Config, code: &str) -> Result<TokenResponse, AppError> {
    let url = format!("{}/login/oauth/access_token", config.oauth_base_url);

    let mut response = agent
        .post(&url)
        .header("Accept", "application/json")
        .send_json(serde_json::json!({
            "client_id": config.client_id,
            "client_secret": config.client_secret,
            "code": code,
        }))
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let body: ExchangeBody = response
        .body_mut()
        .read_json()
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    if let Some(error) = body.error {
        tracing::warn!(%error, "GitHub rejected the code exchange");
        return Err(AppError::ExchangeRejected {
            error,
            error_description: body.error_description,
        });
    }

    let Some(access_token) = body.access_token else {
        return Err(AppError::NoTokenInResponse);
    };

    Ok(TokenResponse {
        access_token,
        token_type: body.token_type.unwrap_or_else(|| "bearer".to_string()),
        scope: body.scope.unwrap_or_default(),
    })
}

/// Confirm a bearer token is still valid by fetching the user behind it
pub fn verify_bearer(
    agent: &ureq::Agent,
    config: &Config,
    token: &str,
) -> Result<serde_json::Value, AppError> {
    let url = format!("{}/user", config.api_base_url);

    let mut response = agent
        .get(&url)
        .header("Authorization", &format!("Bearer {}", token))
        .header("Accept", "application/vnd.github+json")
        .call()
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let status = response.status().as_u16();
    if status == 401 {
        return Err(AppError::InvalidToken);
    }
    if !(200..300).contains(&status) {
        return Err(AppError::Upstream(format!("HTTP {}", status)));
    }

    response
        .body_mut()
        .read_json()
        .map_err(|e| AppError::Upstream(e.to_string()))
}
