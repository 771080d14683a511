use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;

use pulse_core::models::{ProfileBundle, Repository, UserProfile};
use pulse_core::stats::{
    self, Insights, LanguageCount, RepoTotals, SizeDistribution, SortKey,
};
use pulse_core::ResponseCache;

use crate::cache_store;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::history::SearchHistory;
use crate::output::{
    format_count, format_relative_date, output_rate_limit, output_result, Displayable,
};

/// Full analytics view-model for one profile lookup
#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub username: String,
    pub generated_at: DateTime<Utc>,
    pub profile: UserProfile,
    pub totals: RepoTotals,
    pub insights: Insights,
    pub languages: Vec<LanguageCount>,
    pub size_distribution: SizeDistribution,
    /// Sorted (and optionally filtered) repository list
    pub repositories: Vec<Repository>,
    #[serde(skip)]
    list_limit: usize,
}

impl ProfileReport {
    /// Derive every aggregate from one fetched bundle.
    ///
    /// Totals, insights, languages and size buckets always cover the full
    /// repository set; the filter only narrows the rendered list.
    pub fn build(
        username: &str,
        bundle: &ProfileBundle,
        sort: SortKey,
        filter: Option<&str>,
        list_limit: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let sorted = stats::sort_repositories(&bundle.repos, sort);
        let repositories = match filter {
            Some(query) => stats::filter_repositories(&sorted, query),
            None => sorted,
        };

        Self {
            username: username.to_string(),
            generated_at: now,
            profile: bundle.user.clone(),
            totals: stats::totals(&bundle.repos),
            insights: stats::insights(&bundle.repos, now),
            languages: stats::language_breakdown(&bundle.repos, 8),
            size_distribution: stats::size_distribution(&bundle.repos),
            repositories,
            list_limit,
        }
    }
}

fn format_repository(repo: &Repository, now: DateTime<Utc>) -> String {
    let mut badges = String::new();
    if repo.private {
        badges.push_str(&format!(" {}", "[private]".yellow()));
    }
    if repo.fork {
        badges.push_str(&format!(" {}", "[fork]".dimmed()));
    }
    if stats::is_trending(repo, now) {
        badges.push_str(&format!(" {}", "[trending]".magenta().bold()));
    }

    let mut line = format!(
        "{}{} - {} stars, {} forks",
        repo.name.cyan().bold(),
        badges,
        format_count(repo.stargazers_count),
        format_count(repo.forks_count),
    );
    if repo.open_issues_count > 0 {
        line.push_str(&format!(", {} issues", format_count(repo.open_issues_count)));
    }
    if let Some(language) = &repo.language {
        line.push_str(&format!(" - {}", language.magenta()));
    }
    line.push_str(&format!(
        " - updated {}",
        format_relative_date(repo.updated_at, now).dimmed()
    ));

    if let Some(description) = &repo.description {
        line.push_str(&format!("\n     {}", description));
    }
    if !repo.topics.is_empty() {
        let shown: Vec<&str> = repo.topics.iter().take(5).map(String::as_str).collect();
        let overflow = repo.topics.len().saturating_sub(5);
        let mut topics = shown.join(", ");
        if overflow > 0 {
            topics.push_str(&format!(" +{}", overflow));
        }
        line.push_str(&format!("\n     {}: {}", "topics".dimmed(), topics));
    }

    line
}

impl Displayable for ProfileReport {
    fn display(&self) -> String {
        let user = &self.profile;
        let mut output = format!(
            "{} {}\n  {}",
            user.display_name().white().bold(),
            format!("(@{})", user.login).cyan(),
            user.html_url.dimmed(),
        );

        if let Some(bio) = &user.bio {
            output.push_str(&format!("\n  {}", bio));
        }
        if let Some(location) = &user.location {
            output.push_str(&format!("\n  {}: {}", "Location".dimmed(), location));
        }

        output.push_str(&format!(
            "\n  {}: {}  {}: {}  {}: {}  {}: {}",
            "Public repos".dimmed(),
            format_count(user.public_repos),
            "Followers".dimmed(),
            format_count(user.followers),
            "Following".dimmed(),
            format_count(user.following),
            "Gists".dimmed(),
            format_count(user.public_gists),
        ));
        if let Some(private) = user.private_repo_count() {
            output.push_str(&format!(
                "  {}: {}",
                "Private repos".dimmed(),
                format_count(private)
            ));
        }

        output.push_str(&format!(
            "\n\n{}\n  {}: {}  {}: {}  {}: {} KB",
            "Repository Stats".white().bold(),
            "Total Stars".dimmed(),
            format_count(self.totals.stars),
            "Total Forks".dimmed(),
            format_count(self.totals.forks),
            "Avg Size".dimmed(),
            format_count(self.totals.avg_size_kb),
        ));

        output.push_str(&format!("\n\n{}", "Top Repositories".white().bold()));
        if self.repositories.is_empty() {
            output.push_str("\n  No repositories found");
        }
        for (index, repo) in self.repositories.iter().take(self.list_limit).enumerate() {
            output.push_str(&format!(
                "\n  {}. {}",
                index + 1,
                format_repository(repo, self.generated_at)
            ));
        }
        let hidden = self.repositories.len().saturating_sub(self.list_limit);
        if hidden > 0 {
            output.push_str(&format!(
                "\n  {}",
                format!("... {} more (raise --limit to see them)", hidden).dimmed()
            ));
        }

        if !self.languages.is_empty() {
            let langs: Vec<String> = self
                .languages
                .iter()
                .map(|l| format!("{} ({})", l.language.magenta(), l.repos))
                .collect();
            output.push_str(&format!(
                "\n\n{}\n  {}",
                "Languages".white().bold(),
                langs.join(", ")
            ));
        }

        let dist = &self.size_distribution;
        output.push_str(&format!(
            "\n\n{}\n  {}: {}  {}: {}  {}: {}  {}: {}",
            "Size Distribution".white().bold(),
            "< 1 MB".dimmed(),
            dist.under_1_mb,
            "1-10 MB".dimmed(),
            dist.from_1_to_10_mb,
            "10-100 MB".dimmed(),
            dist.from_10_to_100_mb,
            "> 100 MB".dimmed(),
            dist.over_100_mb,
        ));

        output.push_str(&format!(
            "\n\n{}\n  {}: ~{}  {}: {}  {}: {}  {}: {}",
            "Insights".white().bold(),
            "Est. commits".dimmed(),
            format_count(self.insights.estimated_commits),
            "Avg stars/repo".dimmed(),
            format_count(self.insights.avg_stars_per_repo),
            "Top language".dimmed(),
            self.insights
                .most_productive_language
                .as_deref()
                .unwrap_or("n/a"),
            "Created this year".dimmed(),
            self.insights.repos_created_this_year,
        ));

        let recent = stats::recent_activity(&self.repositories, 5);
        if !recent.is_empty() {
            output.push_str(&format!("\n\n{}", "Recent Activity".white().bold()));
            for repo in &recent {
                output.push_str(&format!(
                    "\n  {} - updated {}",
                    repo.name.cyan(),
                    format_relative_date(repo.updated_at, self.generated_at)
                ));
            }
        }

        output
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_profile(
    config: &Config,
    cache_dir: Option<&Path>,
    format: OutputFormat,
    username: &str,
    sort: SortKey,
    filter: Option<&str>,
    limit: usize,
    no_cache: bool,
    export: Option<&Path>,
) -> Result<()> {
    let client = super::build_client(config)?;
    let mut cache = cache_store::load(cache_dir)?;
    let key = ResponseCache::key_for(username);

    let cached = if no_cache { None } else { cache.get(&key) };
    let from_cache = cached.is_some();

    let bundle = match cached {
        Some(bundle) => bundle,
        None => {
            // Both halves must arrive before anything is cached; the first
            // failure aborts the lookup with nothing written
            let user = client
                .fetch_user(username)
                .with_context(|| format!("Failed to fetch profile for '{}'", username))?;
            let repos = client
                .fetch_user_repositories(username)
                .with_context(|| format!("Failed to fetch repositories for '{}'", username))?;

            let bundle = ProfileBundle { user, repos };
            cache.put(&key, bundle.clone());
            cache_store::save(&cache, cache_dir)?;
            bundle
        }
    };

    let report = ProfileReport::build(username, &bundle, sort, filter, limit, Utc::now());

    output_result(&report, format);

    if let Some(path) = export {
        let content = serde_json::to_string_pretty(&report)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;
        if format == OutputFormat::Text {
            eprintln!("{}", format!("Analytics exported to {}", path.display()).dimmed());
        }
    }

    let mut history = SearchHistory::load().unwrap_or_default();
    history.record(username);
    history.save()?;

    if format == OutputFormat::Text {
        if from_cache {
            eprintln!("{}", "Served from session cache".dimmed());
        } else {
            output_rate_limit(client.rate_limit());
        }
    }

    Ok(())
}
