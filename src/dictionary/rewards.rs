// Reward bookkeeping: points for contributing and contributor levels.
//
// Awarding points is a side effect of the main operation. A failure here is
// logged and swallowed: the word was already saved, approved or deleted.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::db::Database;

/// Points for submitting a new entry.
pub const SUBMISSION_POINTS: i64 = 10;

/// Points for the creator when a moderator approves their entry.
pub const APPROVAL_POINTS: i64 = 15;

/// Points taken back when a contributor deletes their own entry.
pub const DELETION_PENALTY: i64 = 5;

/// Add `delta` points to a user, logging instead of failing.
/// Returns the new total when the update went through.
pub async fn award(db: &Arc<dyn Database>, user_id: i64, delta: i64, reason: &str) -> Option<i64> {
    match db.add_points(user_id, delta).await {
        Ok(total) => {
            info!(user_id, delta, total, reason, "Updated contributor points");
            Some(total)
        }
        Err(e) => {
            warn!(error = %e, user_id, delta, reason, "Failed to update contributor points");
            None
        }
    }
}

/// Rank shown next to a contributor's name, based on how many entries
/// they've submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ContributorLevel {
    pub fn from_word_count(count: i64) -> Self {
        match count {
            n if n >= 50 => ContributorLevel::Expert,
            n if n >= 20 => ContributorLevel::Advanced,
            n if n >= 5 => ContributorLevel::Intermediate,
            _ => ContributorLevel::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContributorLevel::Beginner => "Beginner",
            ContributorLevel::Intermediate => "Intermediate",
            ContributorLevel::Advanced => "Advanced",
            ContributorLevel::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for ContributorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(ContributorLevel::from_word_count(0), ContributorLevel::Beginner);
        assert_eq!(ContributorLevel::from_word_count(4), ContributorLevel::Beginner);
        assert_eq!(ContributorLevel::from_word_count(5), ContributorLevel::Intermediate);
        assert_eq!(ContributorLevel::from_word_count(19), ContributorLevel::Intermediate);
        assert_eq!(ContributorLevel::from_word_count(20), ContributorLevel::Advanced);
        assert_eq!(ContributorLevel::from_word_count(49), ContributorLevel::Advanced);
        assert_eq!(ContributorLevel::from_word_count(50), ContributorLevel::Expert);
    }

    #[tokio::test]
    async fn test_award_returns_running_total() {
        let db = crate::db::in_memory().unwrap();
        assert_eq!(award(&db, 3, SUBMISSION_POINTS, "submit").await, Some(10));
        assert_eq!(award(&db, 3, APPROVAL_POINTS, "approve").await, Some(25));
        assert_eq!(award(&db, 3, -DELETION_PENALTY, "delete").await, Some(20));
    }
}
