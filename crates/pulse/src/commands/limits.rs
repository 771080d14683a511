use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output::output_result;

/// Proactive `GET /rate_limit` refresh and display
pub fn handle_limits(config: &Config, format: OutputFormat) -> Result<()> {
    let client = super::build_client(config)?;

    let info = client
        .fetch_rate_limit()
        .context("Failed to fetch rate limit")?;

    output_result(&info, format);
    Ok(())
}
