//! Pure transforms over repository collections.
//!
//! Every function here is deterministic and side-effect free: inputs are never
//! mutated and anything time-dependent takes `now` as a parameter.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::models::Repository;

/// Stars a repository needs before it can count as trending
pub const TRENDING_MIN_STARS: u64 = 50;
/// Maximum days since last update for a trending repository
pub const TRENDING_MAX_AGE_DAYS: i64 = 30;

/// Aggregate star/fork/size totals for a repository collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepoTotals {
    pub stars: u64,
    pub forks: u64,
    pub size_kb: u64,
    /// Mean repository size in KB, rounded to the nearest integer; 0 when empty
    pub avg_size_kb: u64,
}

pub fn totals(repos: &[Repository]) -> RepoTotals {
    let stars = repos.iter().map(|r| r.stargazers_count).sum();
    let forks = repos.iter().map(|r| r.forks_count).sum();
    let size_kb: u64 = repos.iter().map(|r| r.size).sum();
    let avg_size_kb = if repos.is_empty() {
        0
    } else {
        (size_kb as f64 / repos.len() as f64).round() as u64
    };

    RepoTotals {
        stars,
        forks,
        size_kb,
        avg_size_kb,
    }
}

/// Sort key for the top-repositories view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    Forks,
    Updated,
}

/// Sort descending by the given key.
///
/// The sort must be stable: for equal keys the API's original order is
/// meaningful and is preserved.
pub fn sort_repositories(repos: &[Repository], key: SortKey) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    match key {
        SortKey::Stars => sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortKey::Forks => sorted.sort_by(|a, b| b.forks_count.cmp(&a.forks_count)),
        SortKey::Updated => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    sorted
}

/// Repository count for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub repos: usize,
}

/// Count repositories per non-null language, descending by count.
///
/// Ties keep first-encountered order; the result is truncated to `top`.
pub fn language_breakdown(repos: &[Repository], top: usize) -> Vec<LanguageCount> {
    let mut counts: Vec<LanguageCount> = Vec::new();
    for repo in repos {
        let Some(lang) = repo.language.as_deref() else {
            continue;
        };
        match counts.iter_mut().find(|c| c.language == lang) {
            Some(count) => count.repos += 1,
            None => counts.push(LanguageCount {
                language: lang.to_string(),
                repos: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.repos.cmp(&a.repos));
    counts.truncate(top);
    counts
}

/// Case-insensitive substring filter over name, description, language and topics.
///
/// An empty or whitespace-only query returns the input unchanged, so callers
/// can feed the currently sorted set straight through.
pub fn filter_repositories(repos: &[Repository], query: &str) -> Vec<Repository> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return repos.to_vec();
    }

    repos
        .iter()
        .filter(|repo| {
            repo.name.to_lowercase().contains(&query)
                || repo
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&query))
                || repo
                    .language
                    .as_ref()
                    .is_some_and(|l| l.to_lowercase().contains(&query))
                || repo.topics.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Repository counts bucketed by size in MB
///
/// Buckets are inclusive-low/exclusive-high except the open-ended last one;
/// together they partition the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeDistribution {
    pub under_1_mb: usize,
    pub from_1_to_10_mb: usize,
    pub from_10_to_100_mb: usize,
    pub over_100_mb: usize,
}

impl SizeDistribution {
    pub fn total(&self) -> usize {
        self.under_1_mb + self.from_1_to_10_mb + self.from_10_to_100_mb + self.over_100_mb
    }
}

pub fn size_distribution(repos: &[Repository]) -> SizeDistribution {
    let mut dist = SizeDistribution::default();
    for repo in repos {
        let size_mb = repo.size as f64 / 1024.0;
        if size_mb < 1.0 {
            dist.under_1_mb += 1;
        } else if size_mb < 10.0 {
            dist.from_1_to_10_mb += 1;
        } else if size_mb < 100.0 {
            dist.from_10_to_100_mb += 1;
        } else {
            dist.over_100_mb += 1;
        }
    }
    dist
}

/// A repository is trending iff it clears the star threshold and was updated
/// within the last 30 days
pub fn is_trending(repo: &Repository, now: DateTime<Utc>) -> bool {
    repo.stargazers_count > TRENDING_MIN_STARS
        && now.signed_duration_since(repo.updated_at) < Duration::days(TRENDING_MAX_AGE_DAYS)
}

/// Derived activity figures for the insights panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    /// Size-based approximation (`size / 10` per repository), not a real
    /// commit count
    pub estimated_commits: u64,
    pub avg_stars_per_repo: u64,
    pub most_productive_language: Option<String>,
    pub repos_created_this_year: usize,
}

pub fn insights(repos: &[Repository], now: DateTime<Utc>) -> Insights {
    let total_stars: u64 = repos.iter().map(|r| r.stargazers_count).sum();
    let avg_stars_per_repo = if repos.is_empty() {
        0
    } else {
        (total_stars as f64 / repos.len() as f64).round() as u64
    };

    Insights {
        estimated_commits: repos.iter().map(|r| r.size / 10).sum(),
        avg_stars_per_repo,
        most_productive_language: language_breakdown(repos, 1)
            .into_iter()
            .next()
            .map(|c| c.language),
        repos_created_this_year: repos
            .iter()
            .filter(|r| r.created_at.year() == now.year())
            .count(),
    }
}

/// Most recently updated repositories, newest first
pub fn recent_activity(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut sorted = sort_repositories(repos, SortKey::Updated);
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn repo(name: &str, stars: u64, forks: u64, size: u64) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: None,
            stargazers_count: stars,
            forks_count: forks,
            open_issues_count: 0,
            size,
            html_url: format!("https://github.com/alice/{}", name),
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            topics: Vec::new(),
            private: false,
            fork: false,
        }
    }

    fn repo_with_language(name: &str, language: &str) -> Repository {
        Repository {
            language: Some(language.to_string()),
            ..repo(name, 0, 0, 0)
        }
    }

    #[test]
    fn totals_match_manual_sums() {
        let repos = vec![repo("a", 10, 2, 100), repo("b", 5, 3, 200), repo("c", 0, 0, 333)];
        let t = totals(&repos);
        assert_eq!(t.stars, 15);
        assert_eq!(t.forks, 5);
        assert_eq!(t.size_kb, 633);
        // 633 / 3 = 211
        assert_eq!(t.avg_size_kb, 211);
    }

    #[test]
    fn totals_average_rounds_to_nearest() {
        let repos = vec![repo("a", 0, 0, 1), repo("b", 0, 0, 2)];
        // 1.5 rounds up
        assert_eq!(totals(&repos).avg_size_kb, 2);
    }

    #[test]
    fn totals_empty_collection_is_all_zero() {
        let t = totals(&[]);
        assert_eq!(t, RepoTotals::default());
    }

    #[test]
    fn sort_by_stars_is_stable_on_ties() {
        let mut first = repo("first", 100, 0, 0);
        first.updated_at = now() - Duration::days(10);
        let mut second = repo("second", 100, 0, 0);
        second.updated_at = now() - Duration::days(40);

        let sorted = sort_repositories(&[first, second], SortKey::Stars);
        assert_eq!(sorted[0].name, "first");
        assert_eq!(sorted[1].name, "second");
    }

    #[test]
    fn sort_by_forks_descending() {
        let repos = vec![repo("a", 0, 1, 0), repo("b", 0, 9, 0), repo("c", 0, 4, 0)];
        let sorted = sort_repositories(&repos, SortKey::Forks);
        let names: Vec<_> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn sort_by_updated_newest_first() {
        let mut a = repo("a", 0, 0, 0);
        a.updated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut b = repo("b", 0, 0, 0);
        b.updated_at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let sorted = sort_repositories(&[a, b], SortKey::Updated);
        assert_eq!(sorted[0].name, "b");
    }

    #[test]
    fn trending_requires_stars_and_recency() {
        let mut fresh = repo("fresh", 100, 0, 0);
        fresh.updated_at = now() - Duration::days(10);
        let mut stale = repo("stale", 100, 0, 0);
        stale.updated_at = now() - Duration::days(40);
        let mut quiet = repo("quiet", 50, 0, 0);
        quiet.updated_at = now() - Duration::days(10);

        assert!(is_trending(&fresh, now()));
        assert!(!is_trending(&stale, now()));
        // 50 stars does not clear the strict > 50 threshold
        assert!(!is_trending(&quiet, now()));
    }

    #[test]
    fn language_breakdown_counts_and_truncates() {
        let repos = vec![
            repo_with_language("a", "Rust"),
            repo_with_language("b", "Python"),
            repo_with_language("c", "Rust"),
            repo("d", 0, 0, 0),
            repo_with_language("e", "Go"),
        ];

        let breakdown = language_breakdown(&repos, 2);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].language, "Rust");
        assert_eq!(breakdown[0].repos, 2);
        // Python and Go tie at 1; Python was encountered first
        assert_eq!(breakdown[1].language, "Python");
    }

    #[test]
    fn filter_matches_all_four_fields_case_insensitively() {
        let mut by_name = repo("WebServer", 0, 0, 0);
        by_name.description = Some("nothing".to_string());
        let mut by_description = repo("a", 0, 0, 0);
        by_description.description = Some("A tiny web framework".to_string());
        let by_language = repo_with_language("b", "Webassembly");
        let mut by_topic = repo("c", 0, 0, 0);
        by_topic.topics = vec!["webdev".to_string()];
        let unrelated = repo("d", 0, 0, 0);

        let repos = vec![by_name, by_description, by_language, by_topic, unrelated];
        let filtered = filter_repositories(&repos, "WEB");
        let names: Vec<_> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["WebServer", "a", "b", "c"]);
    }

    #[test]
    fn filter_empty_query_returns_input_unchanged() {
        let repos = vec![repo("a", 1, 0, 0), repo("b", 2, 0, 0)];
        let filtered = filter_repositories(&repos, "   ");
        let names: Vec<_> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn filter_is_a_narrowing() {
        let repos = vec![repo("alpha", 0, 0, 0), repo("beta", 0, 0, 0)];
        let filtered = filter_repositories(&repos, "alp");
        assert!(filtered.len() <= repos.len());
        assert!(filtered.iter().all(|f| repos.iter().any(|r| r.name == f.name)));
    }

    #[test]
    fn size_buckets_partition_the_input() {
        let repos = vec![
            repo("tiny", 0, 0, 500),        // < 1 MB
            repo("boundary", 0, 0, 1024),   // exactly 1 MB -> second bucket
            repo("medium", 0, 0, 5 * 1024), // 5 MB
            repo("large", 0, 0, 50 * 1024), // 50 MB
            repo("huge", 0, 0, 200 * 1024), // 200 MB
        ];

        let dist = size_distribution(&repos);
        assert_eq!(dist.under_1_mb, 1);
        assert_eq!(dist.from_1_to_10_mb, 2);
        assert_eq!(dist.from_10_to_100_mb, 1);
        assert_eq!(dist.over_100_mb, 1);
        assert_eq!(dist.total(), repos.len());
    }

    #[test]
    fn insights_use_size_heuristic_and_first_encountered_tie_break() {
        let mut this_year = repo_with_language("a", "Rust");
        this_year.created_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        this_year.size = 105;
        this_year.stargazers_count = 9;
        let mut last_year = repo_with_language("b", "Python");
        last_year.size = 19;
        last_year.stargazers_count = 2;

        let derived = insights(&[this_year, last_year], now());
        // floor(105/10) + floor(19/10)
        assert_eq!(derived.estimated_commits, 11);
        // round(11 / 2)
        assert_eq!(derived.avg_stars_per_repo, 6);
        // Rust and Python tie at one repo each; Rust came first
        assert_eq!(derived.most_productive_language.as_deref(), Some("Rust"));
        assert_eq!(derived.repos_created_this_year, 1);
    }

    #[test]
    fn insights_empty_collection() {
        let derived = insights(&[], now());
        assert_eq!(derived.avg_stars_per_repo, 0);
        assert_eq!(derived.most_productive_language, None);
    }

    #[test]
    fn recent_activity_takes_newest() {
        let mut old = repo("old", 0, 0, 0);
        old.updated_at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut new = repo("new", 0, 0, 0);
        new.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let recent = recent_activity(&[old, new], 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "new");
    }
}
