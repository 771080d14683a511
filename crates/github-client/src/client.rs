use std::cell::Cell;
use std::time::Duration;
use ureq::Agent;

use pulse_core::models::{Commit, RateLimitInfo, Repository, UserProfile};
use serde::Deserialize;

use crate::error::{GitHubError, Result};

/// Repositories fetched per page; only the first page is requested
pub const REPOS_PER_PAGE: usize = 100;

/// GitHub REST API client
///
/// Works unauthenticated (public rate limit) or with a bearer token. Every
/// response, success or failure, refreshes the rate-limit tracker from the
/// `x-ratelimit-*` headers before the caller sees the result. The client does
/// not cache; caching is the caller's responsibility.
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
    auth_login: Option<String>,
    rate_limit: Cell<RateLimitInfo>,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    rate: RateLimitResource,
}

#[derive(Debug, Deserialize)]
struct RateLimitResource {
    limit: u32,
    remaining: u32,
}

impl GitHubClient {
    /// Create a new client targeting api.github.com
    pub fn new(token: Option<&str>) -> Self {
        Self::with_base_url("https://api.github.com", token)
    }

    /// Create a new client with a custom base URL (for testing)
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            auth_login: None,
            rate_limit: Cell::new(RateLimitInfo::default()),
        }
    }

    /// Most recently observed rate-limit headers
    pub fn rate_limit(&self) -> RateLimitInfo {
        self.rate_limit.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Login of the authenticated user, once `authenticate` has run
    pub fn auth_login(&self) -> Option<&str> {
        self.auth_login.as_deref()
    }

    /// Resolve the authenticated user via `GET /user` and remember the login
    /// for self-detection on later lookups
    pub fn authenticate(&mut self) -> Result<UserProfile> {
        let url = format!("{}/user", self.base_url);
        let response = self.get(&url)?;
        let mut response = self.check_response(response)?;
        let user: UserProfile = response.body_mut().read_json()?;
        self.auth_login = Some(user.login.clone());
        Ok(user)
    }

    /// Whether a lookup for `username` is the authenticated user asking about
    /// themselves (case-insensitive login match)
    fn is_self(&self, username: &str) -> bool {
        self.token.is_some()
            && self
                .auth_login
                .as_deref()
                .is_some_and(|login| login.eq_ignore_ascii_case(username))
    }

    /// Fetch a user's profile.
    ///
    /// The authenticated user's own lookup goes through `GET /user`, which is
    /// the only endpoint that populates the private-repo count fields.
    pub fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        let url = if self.is_self(username) {
            format!("{}/user", self.base_url)
        } else {
            format!("{}/users/{}", self.base_url, urlencoding::encode(username))
        };

        let response = self.get(&url)?;
        if response.status().as_u16() == 404 {
            return Err(GitHubError::UserNotFound(username.to_string()));
        }

        let mut response = self.check_response(response)?;
        let user: UserProfile = response.body_mut().read_json()?;
        Ok(user)
    }

    /// Fetch a user's repositories, most recently updated first.
    ///
    /// First page only (100 repositories). The self lookup widens visibility
    /// and affiliation so private and collaborative repositories appear.
    pub fn fetch_user_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        let url = if self.is_self(username) {
            format!(
                "{}/user/repos?per_page={}&sort=updated&visibility=all&affiliation=owner,collaborator,organization_member",
                self.base_url, REPOS_PER_PAGE
            )
        } else {
            format!(
                "{}/users/{}/repos?per_page={}&sort=updated",
                self.base_url,
                urlencoding::encode(username),
                REPOS_PER_PAGE
            )
        };

        let response = self.get(&url)?;
        let mut response = self.check_response(response)?;
        let repos: Vec<Repository> = response.body_mut().read_json()?;
        Ok(repos)
    }

    /// Fetch a repository's most recent commits
    pub fn fetch_commits(&self, owner: &str, repo: &str, per_page: usize) -> Result<Vec<Commit>> {
        let url = format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            per_page
        );

        let response = self.get(&url)?;
        if response.status().as_u16() == 404 {
            return Err(GitHubError::RepositoryNotFound(format!("{}/{}", owner, repo)));
        }

        let mut response = self.check_response(response)?;
        let commits: Vec<Commit> = response.body_mut().read_json()?;
        Ok(commits)
    }

    /// Proactively refresh the rate-limit tracker via `GET /rate_limit`
    pub fn fetch_rate_limit(&self) -> Result<RateLimitInfo> {
        let url = format!("{}/rate_limit", self.base_url);

        let response = self.get(&url)?;
        let mut response = self.check_response(response)?;
        let parsed: RateLimitResponse = response.body_mut().read_json()?;

        let info = RateLimitInfo {
            remaining: parsed.rate.remaining,
            limit: parsed.rate.limit,
        };
        self.rate_limit.set(info);
        Ok(info)
    }

    /// Issue a GET with the standard headers and record rate-limit headers
    /// from whatever comes back
    fn get(&self, url: &str) -> Result<ureq::http::Response<ureq::Body>> {
        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request.call().map_err(GitHubError::Http)?;
        self.observe_rate_limit(&response);
        Ok(response)
    }

    /// Overwrite the tracker when both rate-limit headers are present
    fn observe_rate_limit(&self, response: &ureq::http::Response<ureq::Body>) {
        let header_value = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        if let (Some(remaining), Some(limit)) = (
            header_value("x-ratelimit-remaining"),
            header_value("x-ratelimit-limit"),
        ) {
            self.rate_limit.set(RateLimitInfo { remaining, limit });
        }
    }

    /// Check response status and return an error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // 403 always means rate limiting here
        if status == 403 {
            return Err(GitHubError::RateLimited);
        }

        // Try to read error body
        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Try to parse as a GitHub error response
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        if status == 401 {
            Err(GitHubError::Unauthorized)
        } else {
            Err(GitHubError::Api { status, message })
        }
    }
}
