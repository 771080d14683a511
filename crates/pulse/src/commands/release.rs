use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use pulse_core::release::ReleaseNotes;
use pulse_core::PulseError;
use std::fs;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output::{output_rate_limit, output_result};

#[allow(clippy::too_many_arguments)]
pub fn handle_release_notes(
    config: &Config,
    format: OutputFormat,
    owner: &str,
    repo: &str,
    version: &str,
    limit: usize,
    output: Option<&Path>,
    copy: bool,
) -> Result<()> {
    let client = super::build_client(config)?;

    let commits = client
        .fetch_commits(owner, repo, limit)
        .with_context(|| format!("Failed to fetch commits for '{}/{}'", owner, repo))?;

    let notes = ReleaseNotes::from_commits(repo, version, &commits);
    output_result(&notes, format);

    let markdown = notes.to_markdown(Utc::now());

    if let Some(path) = output {
        fs::write(path, &markdown)
            .with_context(|| format!("Failed to write release notes: {}", path.display()))?;
        if format == OutputFormat::Text {
            eprintln!(
                "{}",
                format!("Release notes written to {}", path.display()).dimmed()
            );
        }
    }

    if copy {
        copy_to_clipboard(&markdown)?;
        if format == OutputFormat::Text {
            eprintln!("{}", "Release notes copied to clipboard".dimmed());
        }
    }

    if format == OutputFormat::Text {
        output_rate_limit(client.rate_limit());
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PulseError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| PulseError::Clipboard(e.to_string()))?;
    Ok(())
}
