use anyhow::{bail, Context, Result};
use pulse_core::team::{analyze_team, MemberData};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output::{output_rate_limit, output_result};

pub fn handle_team(config: &Config, format: OutputFormat, members: &[String]) -> Result<()> {
    // Accept both space- and comma-separated member lists
    let usernames: Vec<&str> = members
        .iter()
        .flat_map(|m| m.split(','))
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .collect();

    if usernames.is_empty() {
        bail!("No team member usernames provided");
    }

    let client = super::build_client(config)?;

    // Fail fast: any member's failure abandons the whole analysis
    let mut team = Vec::with_capacity(usernames.len());
    for username in &usernames {
        let user = client
            .fetch_user(username)
            .with_context(|| format!("Failed to fetch profile for '{}'", username))?;
        let repos = client
            .fetch_user_repositories(username)
            .with_context(|| format!("Failed to fetch repositories for '{}'", username))?;
        team.push(MemberData { user, repos });
    }

    let report = analyze_team(&team).context("No team members provided")?;
    output_result(&report, format);

    if format == OutputFormat::Text {
        output_rate_limit(client.rate_limit());
    }

    Ok(())
}
