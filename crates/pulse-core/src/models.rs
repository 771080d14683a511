use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of one repository's metadata, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    /// Primary language; null for empty or language-less repositories
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    /// Repository size in kilobytes
    pub size: u64,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
}

/// A user's profile, fetched once per lookup
///
/// The private-repo fields only populate when the authenticated user requests
/// their own profile via the `/user` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub public_gists: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
}

impl UserProfile {
    /// Display name, falling back to the login
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }

    /// Private-repo count when available, preferring the total over owned-only
    pub fn private_repo_count(&self) -> Option<u64> {
        self.total_private_repos.or(self.owned_private_repos)
    }
}

/// One commit from a repository's history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub commit: CommitDetail,
}

/// The nested `commit` object of a commit listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

/// Git author recorded on a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
}

impl Commit {
    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        &self.commit.author.name
    }
}

/// Most recently observed API rate-limit headers
///
/// Defaults to the unauthenticated public ceiling. Overwritten wholesale by
/// each response that carries the headers; advisory only, never a request gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
}

impl Default for RateLimitInfo {
    fn default() -> Self {
        Self {
            remaining: 60,
            limit: 60,
        }
    }
}

/// A profile and its repository list, fetched and cached as one unit
///
/// Bundling the pair prevents a cached profile from being displayed against a
/// stale repository list or vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub user: UserProfile,
    pub repos: Vec<Repository>,
}

/// One remembered profile lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub url: String,
}

impl SearchHistoryEntry {
    pub fn new(username: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            username: username.to_string(),
            timestamp,
            url: format!("https://github.com/{}", username),
        }
    }
}
