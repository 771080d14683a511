//! Head-to-head comparison of two developers' repository collections.

use serde::Serialize;

use crate::models::{Repository, UserProfile};
use crate::stats::language_breakdown;

/// Star/fork/size totals for one side of a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SideStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_size_kb: u64,
}

pub fn side_stats(repos: &[Repository]) -> SideStats {
    SideStats {
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repos.iter().map(|r| r.forks_count).sum(),
        total_size_kb: repos.iter().map(|r| r.size).sum(),
    }
}

/// Which side of a metric takes the badge; ties badge neither side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Left,
    Right,
    Tie,
}

pub fn winner(left: u64, right: u64) -> Winner {
    if left > right {
        Winner::Left
    } else if right > left {
        Winner::Right
    } else {
        Winner::Tie
    }
}

/// Top language names for one side, most common first
pub fn top_languages(repos: &[Repository], top: usize) -> Vec<String> {
    language_breakdown(repos, top)
        .into_iter()
        .map(|c| c.language)
        .collect()
}

/// One developer's comparison column
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSide {
    pub user: UserProfile,
    pub stats: SideStats,
    pub top_languages: Vec<String>,
}

/// Full comparison result with per-metric winners
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left: ComparisonSide,
    pub right: ComparisonSide,
    pub repos: Winner,
    pub stars: Winner,
    pub forks: Winner,
    pub followers: Winner,
}

impl Comparison {
    pub fn new(
        left_user: UserProfile,
        left_repos: &[Repository],
        right_user: UserProfile,
        right_repos: &[Repository],
    ) -> Self {
        let left_stats = side_stats(left_repos);
        let right_stats = side_stats(right_repos);

        let repos = winner(left_user.public_repos, right_user.public_repos);
        let stars = winner(left_stats.total_stars, right_stats.total_stars);
        let forks = winner(left_stats.total_forks, right_stats.total_forks);
        let followers = winner(left_user.followers, right_user.followers);

        Self {
            left: ComparisonSide {
                top_languages: top_languages(left_repos, 5),
                user: left_user,
                stats: left_stats,
            },
            right: ComparisonSide {
                top_languages: top_languages(right_repos, 5),
                user: right_user,
                stats: right_stats,
            },
            repos,
            stars,
            forks,
            followers,
        }
    }
}
