use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Application-level error type
///
/// Each variant renders the structured JSON body its endpoint promises, so
/// callers never see a bare 500 for an expected failure mode.
#[derive(Debug)]
pub enum AppError {
    /// Request body carried no authorization code
    MissingCode,
    /// GitHub rejected the code exchange; its error fields pass through
    ExchangeRejected {
        error: String,
        error_description: Option<String>,
    },
    /// GitHub answered the exchange without an access token
    NoTokenInResponse,
    /// Verify called without a usable bearer header
    MissingAuthHeader,
    /// Upstream said the presented token is invalid or expired
    InvalidToken,
    /// Upstream call failed outright
    Upstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "Missing authorization code"),
            Self::ExchangeRejected { error, .. } => write!(f, "GitHub rejected exchange: {}", error),
            Self::NoTokenInResponse => write!(f, "No access token received from GitHub"),
            Self::MissingAuthHeader => write!(f, "Missing or invalid authorization header"),
            Self::InvalidToken => write!(f, "Invalid or expired token"),
            Self::Upstream(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::MissingCode => HttpResponse::BadRequest().json(json!({
                "error": "Missing authorization code"
            })),
            Self::ExchangeRejected {
                error,
                error_description,
            } => HttpResponse::BadRequest().json(json!({
                "error": error,
                "error_description": error_description
            })),
            Self::NoTokenInResponse => HttpResponse::InternalServerError().json(json!({
                "error": "No access token received from GitHub"
            })),
            Self::MissingAuthHeader => HttpResponse::Unauthorized().json(json!({
                "error": "Missing or invalid authorization header"
            })),
            Self::InvalidToken => HttpResponse::Unauthorized().json(json!({
                "valid": false,
                "error": "Invalid or expired token"
            })),
            Self::Upstream(message) => HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error",
                "message": message
            })),
        }
    }
}
