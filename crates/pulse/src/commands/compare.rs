use anyhow::{Context, Result};
use pulse_core::compare::Comparison;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output::{output_rate_limit, output_result};

pub fn handle_compare(
    config: &Config,
    format: OutputFormat,
    user1: &str,
    user2: &str,
) -> Result<()> {
    let client = super::build_client(config)?;

    // Fail fast: the first error abandons the whole comparison, no partial
    // columns are ever rendered
    let left_user = client
        .fetch_user(user1)
        .with_context(|| format!("Failed to fetch profile for '{}'", user1))?;
    let left_repos = client
        .fetch_user_repositories(user1)
        .with_context(|| format!("Failed to fetch repositories for '{}'", user1))?;
    let right_user = client
        .fetch_user(user2)
        .with_context(|| format!("Failed to fetch profile for '{}'", user2))?;
    let right_repos = client
        .fetch_user_repositories(user2)
        .with_context(|| format!("Failed to fetch repositories for '{}'", user2))?;

    let comparison = Comparison::new(left_user, &left_repos, right_user, &right_repos);
    output_result(&comparison, format);

    if format == OutputFormat::Text {
        output_rate_limit(client.rate_limit());
    }

    Ok(())
}
