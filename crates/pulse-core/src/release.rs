//! Release-note synthesis from a repository's commit history.
//!
//! Commit messages are bucketed by keyword heuristics; this is intentionally
//! approximate and does no real history analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::models::Commit;

/// Cap on entries in the rendered Other section
const OTHER_SECTION_LIMIT: usize = 10;

/// Release-note bucket for a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Features,
    BugFixes,
    Improvements,
    Documentation,
    Other,
}

/// Keyword sets checked in priority order; the first hit wins and a commit is
/// never counted twice
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Features, &["feature", "add", "new"]),
    (Category::BugFixes, &["fix", "bug", "resolve"]),
    (Category::Improvements, &["improve", "refactor", "optimize"]),
    (Category::Documentation, &["docs", "readme", "comment"]),
];

/// Assign a commit message to its category by its lower-cased first line
pub fn categorize(message: &str) -> Category {
    let first_line = message.lines().next().unwrap_or("").to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| first_line.contains(k)) {
            return *category;
        }
    }
    Category::Other
}

/// Categorized release notes for one repository and version
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseNotes {
    pub repo: String,
    pub version: String,
    pub commit_count: usize,
    /// Number of distinct commit author names
    pub contributor_count: usize,
    pub features: Vec<String>,
    pub bug_fixes: Vec<String>,
    pub improvements: Vec<String>,
    pub documentation: Vec<String>,
    pub other: Vec<String>,
}

impl ReleaseNotes {
    pub fn from_commits(repo: &str, version: &str, commits: &[Commit]) -> Self {
        let mut notes = Self {
            repo: repo.to_string(),
            version: version.to_string(),
            commit_count: commits.len(),
            contributor_count: 0,
            features: Vec::new(),
            bug_fixes: Vec::new(),
            improvements: Vec::new(),
            documentation: Vec::new(),
            other: Vec::new(),
        };

        for commit in commits {
            let line = commit.summary().to_string();
            match categorize(&commit.commit.message) {
                Category::Features => notes.features.push(line),
                Category::BugFixes => notes.bug_fixes.push(line),
                Category::Improvements => notes.improvements.push(line),
                Category::Documentation => notes.documentation.push(line),
                Category::Other => notes.other.push(line),
            }
        }

        notes.contributor_count = commits
            .iter()
            .map(|c| c.author_name())
            .collect::<HashSet<_>>()
            .len();

        notes
    }

    /// Total entries across all categories
    pub fn categorized_count(&self) -> usize {
        self.features.len()
            + self.bug_fixes.len()
            + self.improvements.len()
            + self.documentation.len()
            + self.other.len()
    }

    /// Render the Markdown document.
    ///
    /// Section order is fixed (Features, Bug Fixes, Improvements,
    /// Documentation, Other); empty sections are omitted and the Other
    /// section is truncated to ten entries.
    pub fn to_markdown(&self, date: DateTime<Utc>) -> String {
        let mut doc = format!(
            "# {} {}\n\n**Release Date:** {}\n**Total Commits:** {}\n**Contributors:** {}\n\n",
            self.repo,
            self.version,
            date.format("%Y-%m-%d"),
            self.commit_count,
            self.contributor_count,
        );

        push_section(&mut doc, "✨ Features", &self.features);
        push_section(&mut doc, "🐛 Bug Fixes", &self.bug_fixes);
        push_section(&mut doc, "🔧 Improvements", &self.improvements);
        push_section(&mut doc, "📝 Documentation", &self.documentation);
        let other_shown = &self.other[..self.other.len().min(OTHER_SECTION_LIMIT)];
        push_section(&mut doc, "📦 Other Changes", other_shown);

        doc
    }
}

fn push_section(doc: &mut String, title: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    doc.push_str(&format!("## {}\n", title));
    for entry in entries {
        doc.push_str(&format!("- {}\n", entry));
    }
    doc.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitAuthor, CommitDetail};
    use chrono::TimeZone;

    fn commit(message: &str, author: &str) -> Commit {
        Commit {
            commit: CommitDetail {
                message: message.to_string(),
                author: CommitAuthor {
                    name: author.to_string(),
                },
            },
        }
    }

    #[test]
    fn categorize_matches_keyword_sets() {
        assert_eq!(categorize("add dark mode"), Category::Features);
        assert_eq!(categorize("fix: null check"), Category::BugFixes);
        assert_eq!(categorize("refactor parser"), Category::Improvements);
        assert_eq!(categorize("update readme"), Category::Documentation);
        assert_eq!(categorize("bump version"), Category::Other);
    }

    #[test]
    fn categorize_first_match_wins() {
        // Contains both "fix" and "feature"; Features is checked first
        assert_eq!(categorize("fix the feature toggle"), Category::Features);
    }

    #[test]
    fn categorize_uses_only_the_first_line() {
        assert_eq!(
            categorize("bump version\n\nfixes a bug in the parser"),
            Category::Other
        );
    }

    #[test]
    fn categorization_is_a_partition() {
        let commits = vec![
            commit("fix: null check", "alice"),
            commit("add: dark mode", "bob"),
            commit("docs: update readme", "alice"),
            commit("chore: bump deps", "carol"),
        ];

        let notes = ReleaseNotes::from_commits("demo", "v1.0.0", &commits);
        assert_eq!(notes.categorized_count(), commits.len());
        assert_eq!(notes.bug_fixes, ["fix: null check"]);
        assert_eq!(notes.features, ["add: dark mode"]);
        assert_eq!(notes.documentation, ["docs: update readme"]);
        assert_eq!(notes.other, ["chore: bump deps"]);
        assert_eq!(notes.contributor_count, 3);
    }

    #[test]
    fn scenario_three_commits_three_categories() {
        let commits = vec![
            commit("fix: null check", "a"),
            commit("add: dark mode", "b"),
            commit("docs: update readme", "c"),
        ];

        let notes = ReleaseNotes::from_commits("demo", "v1.0.0", &commits);
        assert_eq!(notes.bug_fixes.len(), 1);
        assert_eq!(notes.features.len(), 1);
        assert_eq!(notes.documentation.len(), 1);
        assert!(notes.improvements.is_empty());
        assert!(notes.other.is_empty());
    }

    #[test]
    fn markdown_has_fixed_section_order_and_omits_empty() {
        let commits = vec![
            commit("docs: typo", "a"),
            commit("add feature flags", "b"),
        ];
        let notes = ReleaseNotes::from_commits("demo", "v2.0.0", &commits);
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let doc = notes.to_markdown(date);

        assert!(doc.starts_with("# demo v2.0.0\n"));
        assert!(doc.contains("**Release Date:** 2024-06-01"));
        assert!(doc.contains("**Total Commits:** 2"));
        let features_at = doc.find("## ✨ Features").unwrap();
        let docs_at = doc.find("## 📝 Documentation").unwrap();
        assert!(features_at < docs_at);
        assert!(!doc.contains("Bug Fixes"));
        assert!(!doc.contains("Other Changes"));
    }

    #[test]
    fn markdown_truncates_other_to_ten() {
        let commits: Vec<Commit> = (0..15)
            .map(|i| commit(&format!("chore: task {}", i), "a"))
            .collect();
        let notes = ReleaseNotes::from_commits("demo", "v1.0.0", &commits);
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let doc = notes.to_markdown(date);

        assert_eq!(doc.matches("- chore: task").count(), 10);
        // The structured notes keep everything; only the document truncates
        assert_eq!(notes.other.len(), 15);
    }
}
