use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::AppError;
use crate::github;
use crate::AppState;

/// GET /api/health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "GitHub OAuth proxy is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    code: Option<String>,
}

/// POST /api/github/oauth/token
///
/// Exchanges an authorization code for an access token. The client secret
/// stays server-side; callers only ever see the resulting token.
pub async fn exchange_token(
    state: web::Data<AppState>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let code = match body.into_inner().code {
        Some(code) if !code.trim().is_empty() => code,
        _ => return Err(AppError::MissingCode),
    };

    info!("Exchanging authorization code for access token");

    let agent = state.agent.clone();
    let config = state.config.clone();
    let token = web::block(move || github::exchange_code(&agent, &config, &code))
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))??;

    info!("Successfully obtained access token");

    Ok(HttpResponse::Ok().json(token))
}

/// GET /api/github/oauth/verify
///
/// Bearer-token passthrough: confirms the presented token is still accepted
/// upstream and returns the user it belongs to.
pub async fn verify_token(
    state: web::Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(AppError::MissingAuthHeader)?;

    let agent = state.agent.clone();
    let config = state.config.clone();
    let user = web::block(move || github::verify_bearer(&agent, &config, &token))
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "user": user,
    })))
}
