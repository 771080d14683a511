//! Aggregate metrics across a set of team members.

use serde::Serialize;

use crate::compare::side_stats;
use crate::models::{Repository, UserProfile};
use crate::stats::{language_breakdown, LanguageCount};

/// One member's fetched profile and repository list
#[derive(Debug, Clone)]
pub struct MemberData {
    pub user: UserProfile,
    pub repos: Vec<Repository>,
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct MemberStats {
    pub login: String,
    pub name: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub total_stars: u64,
    pub total_forks: u64,
}

/// Team-wide aggregation result
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub member_count: usize,
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub avg_stars_per_member: u64,
    /// Top 5 languages across all members' repositories
    pub top_languages: Vec<LanguageCount>,
    /// Members sorted descending by their total stars; ties keep input order
    pub leaderboard: Vec<MemberStats>,
}

/// Aggregate N members' data; `None` for an empty slice (callers validate
/// their input first)
pub fn analyze_team(members: &[MemberData]) -> Option<TeamReport> {
    if members.is_empty() {
        return None;
    }

    let rows: Vec<MemberStats> = members
        .iter()
        .map(|member| {
            let stats = side_stats(&member.repos);
            MemberStats {
                login: member.user.login.clone(),
                name: member.user.name.clone(),
                public_repos: member.user.public_repos,
                followers: member.user.followers,
                total_stars: stats.total_stars,
                total_forks: stats.total_forks,
            }
        })
        .collect();

    let total_repos = rows.iter().map(|r| r.public_repos).sum();
    let total_stars: u64 = rows.iter().map(|r| r.total_stars).sum();
    let total_forks = rows.iter().map(|r| r.total_forks).sum();
    let avg_stars_per_member =
        (total_stars as f64 / members.len() as f64).round() as u64;

    let all_repos: Vec<Repository> = members
        .iter()
        .flat_map(|m| m.repos.iter().cloned())
        .collect();

    let mut leaderboard = rows;
    leaderboard.sort_by(|a, b| b.total_stars.cmp(&a.total_stars));

    Some(TeamReport {
        member_count: members.len(),
        total_repos,
        total_stars,
        total_forks,
        avg_stars_per_member,
        top_languages: language_breakdown(&all_repos, 5),
        leaderboard,
    })
}
