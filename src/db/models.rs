// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Contributor,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Contributor => "contributor",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored or user-supplied role. Accepts the French spelling
    /// `moderateur` for moderators.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "contributor" => Some(Role::Contributor),
            "moderator" | "moderateur" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Moderation state of a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Pending,
    Approved,
    Rejected,
}

impl WordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordStatus::Pending => "pending",
            WordStatus::Approved => "approved",
            WordStatus::Rejected => "rejected",
        }
    }

    /// `en_attente` is accepted as a synonym of pending.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "en_attente" => Some(WordStatus::Pending),
            "approved" => Some(WordStatus::Approved),
            "rejected" => Some(WordStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for WordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// Fields needed to create an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
}

/// A dictionary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub term: String,
    pub definition: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub status: WordStatus,
    /// None once the creator's account has been deleted
    pub created_by: Option<i64>,
    pub is_challenge_word: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields needed to insert an entry. New entries always start pending.
#[derive(Debug, Clone)]
pub struct NewWord {
    pub term: String,
    pub definition: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub created_by: i64,
}

/// Editable fields of an existing entry. `None` leaves an optional field
/// unchanged, `Some("")` clears it.
#[derive(Debug, Clone)]
pub struct WordEdit {
    pub term: String,
    pub definition: String,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

/// Entry counts, either dictionary-wide or for one contributor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WordCounts {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
    pub rejected: i64,
}

/// Points and badges held by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reward {
    pub points: i64,
    pub badges: Vec<String>,
}

/// A leaderboard row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContributor {
    pub user_id: i64,
    /// None when the reward row outlived its user
    pub name: Option<String>,
    pub points: i64,
    pub badges: Vec<String>,
}

/// A stored grammatical variant of an entry (plural, conjugation, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordVariant {
    pub id: i64,
    pub word_id: i64,
    pub variant_type: String,
    pub variant: String,
    pub created_at: String,
}
