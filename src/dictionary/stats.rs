// Public statistics: dictionary counts, newest approved entries, the
// leaderboard and collection challenge progress.

use std::sync::Arc;

use serde::Serialize;

use super::DictResult;
use crate::db::models::{TopContributor, Word};
use crate::db::Database;

pub const DEFAULT_CHALLENGE_TARGET: i64 = 1000;
pub const RECENT_WORDS: u32 = 5;
pub const TOP_CONTRIBUTORS: u32 = 5;

/// Shown in place of a contributor whose account is gone.
pub const ANONYMOUS_CONTRIBUTOR: &str = "Anonymous contributor";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWord {
    pub id: i64,
    pub term: String,
    pub definition: String,
    pub created_at: String,
}

impl From<Word> for RecentWord {
    fn from(word: Word) -> Self {
        Self {
            id: word.id,
            term: word.term,
            definition: word.definition,
            created_at: word.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub name: String,
    pub points: i64,
    pub badges: Vec<String>,
}

impl From<TopContributor> for LeaderboardEntry {
    fn from(top: TopContributor) -> Self {
        Self {
            user_id: top.user_id,
            name: top
                .name
                .unwrap_or_else(|| ANONYMOUS_CONTRIBUTOR.to_string()),
            points: top.points,
            badges: top.badges,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
    pub total: i64,
    pub completed: i64,
    pub percentage: i64,
}

impl ChallengeProgress {
    /// Percentage is rounded and capped at 100. A non-positive target
    /// counts as already complete.
    pub fn new(total: i64, completed: i64) -> Self {
        let percentage = if total <= 0 {
            100
        } else {
            let pct = (completed as f64 / total as f64 * 100.0).round() as i64;
            pct.clamp(0, 100)
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_words: i64,
    pub approved_words: i64,
    pub pending_words: i64,
    pub unique_contributors: i64,
    pub recent_words: Vec<RecentWord>,
    pub top_contributors: Vec<LeaderboardEntry>,
    pub challenge: ChallengeProgress,
}

pub async fn public_stats(db: &Arc<dyn Database>, challenge_target: i64) -> DictResult<PublicStats> {
    let counts = db.word_counts(None).await?;
    let unique_contributors = db.unique_contributors().await?;
    let recent = db.recent_approved(RECENT_WORDS).await?;
    let top = db.top_contributors(TOP_CONTRIBUTORS).await?;

    Ok(PublicStats {
        total_words: counts.total,
        approved_words: counts.approved,
        pending_words: counts.pending,
        unique_contributors,
        recent_words: recent.into_iter().map(RecentWord::from).collect(),
        top_contributors: top.into_iter().map(LeaderboardEntry::from).collect(),
        challenge: ChallengeProgress::new(challenge_target, counts.approved),
    })
}
