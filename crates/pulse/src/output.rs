use crate::cli::OutputFormat;
use chrono::{DateTime, Utc};
use colored::Colorize;
use pulse_core::compare::{Comparison, ComparisonSide, Winner};
use pulse_core::models::{RateLimitInfo, SearchHistoryEntry};
use pulse_core::release::ReleaseNotes;
use pulse_core::team::TeamReport;
use serde::Serialize;

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

pub fn output_list<T: Serialize + Displayable>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            for item in items {
                println!("{}", item.display());
            }
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

/// Advisory rate-limit footer after API commands (text mode, stderr)
pub fn output_rate_limit(info: RateLimitInfo) {
    let line = format!("API rate limit: {}/{} remaining", info.remaining, info.limit);
    if info.remaining < 10 {
        eprintln!("{}", line.red());
    } else if info.remaining < 30 {
        eprintln!("{}", line.yellow());
    } else {
        eprintln!("{}", line.dimmed());
    }
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for RateLimitInfo {
    fn display(&self) -> String {
        format!(
            "{}: {}/{} requests remaining",
            "Rate limit".dimmed(),
            self.remaining.to_string().white().bold(),
            self.limit
        )
    }
}

impl Displayable for SearchHistoryEntry {
    fn display(&self) -> String {
        format!(
            "{}  {} ({})",
            self.username.cyan().bold(),
            format_time_ago(self.timestamp, Utc::now()).dimmed(),
            self.url.dimmed()
        )
    }
}

fn winner_badge(winner: Winner, side: Winner) -> String {
    if winner == side {
        format!(" {}", "(higher)".green().bold())
    } else {
        String::new()
    }
}

fn comparison_column(side: &ComparisonSide, this_side: Winner, cmp: &Comparison) -> String {
    let mut output = format!(
        "{} {}\n  {}: {}{}\n  {}: {}{}\n  {}: {}{}\n  {}: {}{}\n  {}: {}",
        side.user.display_name().white().bold(),
        format!("(@{})", side.user.login).cyan(),
        "Repositories".dimmed(),
        format_count(side.user.public_repos),
        winner_badge(cmp.repos, this_side),
        "Total Stars".dimmed(),
        format_count(side.stats.total_stars),
        winner_badge(cmp.stars, this_side),
        "Total Forks".dimmed(),
        format_count(side.stats.total_forks),
        winner_badge(cmp.forks, this_side),
        "Followers".dimmed(),
        format_count(side.user.followers),
        winner_badge(cmp.followers, this_side),
        "Following".dimmed(),
        format_count(side.user.following),
    );

    if !side.top_languages.is_empty() {
        output.push_str(&format!(
            "\n  {}: {}",
            "Top Languages".dimmed(),
            side.top_languages.join(", ").magenta()
        ));
    }

    output
}

impl Displayable for Comparison {
    fn display(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            "Developer Comparison".white().bold(),
            comparison_column(&self.left, Winner::Left, self),
            comparison_column(&self.right, Winner::Right, self),
        )
    }
}

impl Displayable for TeamReport {
    fn display(&self) -> String {
        let mut output = format!(
            "{}\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}",
            "Team Analysis".white().bold(),
            "Members".dimmed(),
            self.member_count,
            "Total Repositories".dimmed(),
            format_count(self.total_repos),
            "Total Stars".dimmed(),
            format_count(self.total_stars),
            "Total Forks".dimmed(),
            format_count(self.total_forks),
            "Avg Stars per Member".dimmed(),
            format_count(self.avg_stars_per_member),
        );

        if !self.top_languages.is_empty() {
            let langs: Vec<String> = self
                .top_languages
                .iter()
                .map(|l| format!("{} ({})", l.language.magenta(), l.repos))
                .collect();
            output.push_str(&format!("\n  {}: {}", "Technologies".dimmed(), langs.join(", ")));
        }

        output.push_str(&format!("\n\n{}", "Leaderboard".white().bold()));
        for (rank, member) in self.leaderboard.iter().enumerate() {
            output.push_str(&format!(
                "\n  {}. {} - {} stars, {} forks, {} repos, {} followers",
                rank + 1,
                member.login.cyan().bold(),
                format_count(member.total_stars),
                format_count(member.total_forks),
                format_count(member.public_repos),
                format_count(member.followers),
            ));
        }

        output
    }
}

fn release_section(output: &mut String, title: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    output.push_str(&format!("\n\n{}", title.white().bold()));
    for entry in entries {
        output.push_str(&format!("\n  - {}", entry));
    }
}

impl Displayable for ReleaseNotes {
    fn display(&self) -> String {
        let mut output = format!(
            "{} {}\n  {}: {}\n  {}: {}",
            self.repo.cyan().bold(),
            self.version.white().bold(),
            "Commits".dimmed(),
            self.commit_count,
            "Contributors".dimmed(),
            self.contributor_count,
        );

        release_section(&mut output, "Features", &self.features);
        release_section(&mut output, "Bug Fixes", &self.bug_fixes);
        release_section(&mut output, "Improvements", &self.improvements);
        release_section(&mut output, "Documentation", &self.documentation);
        let other_shown = &self.other[..self.other.len().min(10)];
        release_section(&mut output, "Other Changes", other_shown);

        output
    }
}

/// Compact count formatting: 1.2K, 3.4M
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Relative date for repository timestamps: today, yesterday, N days ago...
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(date).num_days().max(0);

    if days == 0 {
        "today".to_string()
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{} months ago", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1 year ago".to_string()
        } else {
            format!("{} years ago", years)
        }
    }
}

/// Short relative time for history entries: just now, 5m ago, 3h ago...
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds().max(0);

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{}d ago", seconds / 86400)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
