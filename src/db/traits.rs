// Database trait: async interface for all DB operations.
//
// The only implementor today is SqliteDatabase (wraps rusqlite). Methods are
// async so a natively async backend can slot in behind the same interface.
//
// The trait mirrors the queries.rs function signatures, so callers hold an
// `Arc<dyn Database>` and never touch a Connection directly.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{
    NewUser, NewWord, Reward, Role, TopContributor, User, Word, WordCounts, WordEdit, WordStatus,
    WordVariant,
};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Users ---

    /// Insert a new user and return its ID.
    async fn create_user(&self, user: &NewUser) -> Result<i64>;

    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Look up a user by email, ignoring case.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Change a user's role. Returns false if the user doesn't exist.
    async fn set_user_role(&self, id: i64, role: Role) -> Result<bool>;

    // --- Words ---

    /// Insert a pending entry and return the stored row.
    async fn insert_word(&self, word: &NewWord) -> Result<Word>;

    async fn get_word(&self, id: i64) -> Result<Option<Word>>;

    /// All entries, optionally filtered by status, newest first.
    async fn list_words(&self, status: Option<WordStatus>) -> Result<Vec<Word>>;

    /// Entries submitted by one user, newest first.
    async fn list_words_by_creator(&self, user_id: i64) -> Result<Vec<Word>>;

    /// Case-insensitive substring search on the term.
    async fn search_words(&self, query: &str, limit: u32) -> Result<Vec<Word>>;

    async fn update_word(&self, id: i64, edit: &WordEdit) -> Result<Option<Word>>;

    async fn delete_word(&self, id: i64) -> Result<bool>;

    /// Set the moderation status. Returns (previous status, updated row).
    async fn set_word_status(
        &self,
        id: i64,
        status: WordStatus,
    ) -> Result<Option<(WordStatus, Word)>>;

    async fn set_challenge_word(&self, id: i64, flag: bool) -> Result<Option<Word>>;

    /// Every term in the dictionary, used as the known vocabulary for extraction.
    async fn all_terms(&self) -> Result<Vec<String>>;

    /// Entry counts for the whole dictionary (None) or one creator.
    async fn word_counts(&self, created_by: Option<i64>) -> Result<WordCounts>;

    async fn unique_contributors(&self) -> Result<i64>;

    async fn recent_approved(&self, limit: u32) -> Result<Vec<Word>>;

    // --- Contributions ---

    async fn insert_contribution(&self, word_id: i64, user_id: i64, comment: &str)
        -> Result<i64>;

    // --- Rewards ---

    /// Add points (negative to remove), never dropping below zero.
    /// Returns the new total.
    async fn add_points(&self, user_id: i64, delta: i64) -> Result<i64>;

    async fn get_reward(&self, user_id: i64) -> Result<Option<Reward>>;

    async fn top_contributors(&self, limit: u32) -> Result<Vec<TopContributor>>;

    // --- Variants ---

    async fn insert_variant(&self, word_id: i64, variant_type: &str, variant: &str)
        -> Result<i64>;

    async fn list_variants(&self, word_id: i64) -> Result<Vec<WordVariant>>;
}
