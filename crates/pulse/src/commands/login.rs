use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::io::{self, BufRead, Write};

use pulse_core::oauth::{self, AuthorizeRequest};

use crate::cli::OutputFormat;
use crate::config::Config;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProxyError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Browser OAuth flow against the token-exchange proxy.
///
/// The client secret never reaches this process; all this command holds is
/// the authorization code the user pastes back and the resulting token.
pub fn handle_login(config: &Config, client_id: Option<&str>, format: OutputFormat) -> Result<()> {
    let client_id = client_id
        .or(config.client_id.as_deref())
        .context("No OAuth client id configured. Set client_id in the config file or pass --client-id")?;

    let request = AuthorizeRequest::new(client_id, config.redirect_uri());
    let url = request.authorize_url();

    println!("Opening GitHub authorization page...");
    println!("  {}", url.cyan());
    let _ = open::that(&url);

    println!();
    println!("After authorizing, paste the redirect URL (or its code=...&state=... query):");
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let (code, state) = oauth::parse_callback(&line)?;
    // A state mismatch is a security-relevant abort, never retried
    oauth::verify_state(&request.state, &state)?;

    let token = exchange_via_proxy(config.proxy_url(), &code)?;
    let path = Config::save_token(&token.access_token)?;

    match format {
        OutputFormat::Json => {
            println!(r#"{{"success": true, "config": "{}"}}"#, path.display());
        }
        OutputFormat::Text => {
            println!();
            println!(
                "{} Token saved to {}",
                "✓".green().bold(),
                path.display()
            );
        }
    }
    Ok(())
}

pub fn handle_logout(format: OutputFormat) -> Result<()> {
    let cleared = Config::clear_token()?;
    match format {
        OutputFormat::Json => {
            println!(r#"{{"success": true, "cleared": {}}}"#, cleared.is_some());
        }
        OutputFormat::Text => match cleared {
            Some(path) => println!("Token removed from {}", path.display()),
            None => println!("No stored token to remove"),
        },
    }
    Ok(())
}

/// POST the authorization code to the proxy and take the token it returns
fn exchange_via_proxy(proxy_url: &str, code: &str) -> Result<TokenResponse> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(std::time::Duration::from_secs(30)))
        .http_status_as_error(false)
        .build()
        .into();

    let url = format!(
        "{}/api/github/oauth/token",
        proxy_url.trim_end_matches('/')
    );
    let mut response = agent
        .post(&url)
        .send_json(serde_json::json!({ "code": code }))
        .with_context(|| format!("Failed to reach OAuth proxy at {}", url))?;

    let status = response.status().as_u16();
    if (200..300).contains(&status) {
        return response
            .body_mut()
            .read_json()
            .context("OAuth proxy returned an unreadable token response");
    }

    // The proxy reports structured errors; surface them as-is
    let err: ProxyError = response
        .body_mut()
        .read_json()
        .unwrap_or_else(|_| ProxyError {
            error: format!("HTTP {}", status),
            error_description: None,
        });
    match err.error_description {
        Some(description) => Err(anyhow!("{}: {}", err.error, description)),
        None => Err(anyhow!("{}", err.error)),
    }
}
