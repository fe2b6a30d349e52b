// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{
    NewUser, NewWord, Reward, Role, TopContributor, User, Word, WordCounts, WordEdit, WordStatus,
    WordVariant,
};
use super::queries;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::create_user(&conn, user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        queries::get_user(&conn, id)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        queries::get_user_by_email(&conn, email)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().await;
        queries::list_users(&conn)
    }

    async fn set_user_role(&self, id: i64, role: Role) -> Result<bool> {
        let conn = self.conn.lock().await;
        queries::set_user_role(&conn, id, role)
    }

    async fn insert_word(&self, word: &NewWord) -> Result<Word> {
        let conn = self.conn.lock().await;
        queries::insert_word(&conn, word)
    }

    async fn get_word(&self, id: i64) -> Result<Option<Word>> {
        let conn = self.conn.lock().await;
        queries::get_word(&conn, id)
    }

    async fn list_words(&self, status: Option<WordStatus>) -> Result<Vec<Word>> {
        let conn = self.conn.lock().await;
        queries::list_words(&conn, status)
    }

    async fn list_words_by_creator(&self, user_id: i64) -> Result<Vec<Word>> {
        let conn = self.conn.lock().await;
        queries::list_words_by_creator(&conn, user_id)
    }

    async fn search_words(&self, query: &str, limit: u32) -> Result<Vec<Word>> {
        let conn = self.conn.lock().await;
        queries::search_words(&conn, query, limit)
    }

    async fn update_word(&self, id: i64, edit: &WordEdit) -> Result<Option<Word>> {
        let conn = self.conn.lock().await;
        queries::update_word(&conn, id, edit)
    }

    async fn delete_word(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        queries::delete_word(&conn, id)
    }

    async fn set_word_status(
        &self,
        id: i64,
        status: WordStatus,
    ) -> Result<Option<(WordStatus, Word)>> {
        let conn = self.conn.lock().await;
        queries::set_word_status(&conn, id, status)
    }

    async fn set_challenge_word(&self, id: i64, flag: bool) -> Result<Option<Word>> {
        let conn = self.conn.lock().await;
        queries::set_challenge_word(&conn, id, flag)
    }

    async fn all_terms(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().await;
        queries::all_terms(&conn)
    }

    async fn word_counts(&self, created_by: Option<i64>) -> Result<WordCounts> {
        let conn = self.conn.lock().await;
        queries::word_counts(&conn, created_by)
    }

    async fn unique_contributors(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::unique_contributors(&conn)
    }

    async fn recent_approved(&self, limit: u32) -> Result<Vec<Word>> {
        let conn = self.conn.lock().await;
        queries::recent_approved(&conn, limit)
    }

    async fn insert_contribution(
        &self,
        word_id: i64,
        user_id: i64,
        comment: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::insert_contribution(&conn, word_id, user_id, comment)
    }

    async fn add_points(&self, user_id: i64, delta: i64) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::add_points(&conn, user_id, delta)
    }

    async fn get_reward(&self, user_id: i64) -> Result<Option<Reward>> {
        let conn = self.conn.lock().await;
        queries::get_reward(&conn, user_id)
    }

    async fn top_contributors(&self, limit: u32) -> Result<Vec<TopContributor>> {
        let conn = self.conn.lock().await;
        queries::top_contributors(&conn, limit)
    }

    async fn insert_variant(
        &self,
        word_id: i64,
        variant_type: &str,
        variant: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        queries::insert_variant(&conn, word_id, variant_type, variant)
    }

    async fn list_variants(&self, word_id: i64) -> Result<Vec<WordVariant>> {
        let conn = self.conn.lock().await;
        queries::list_variants(&conn, word_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Salka".to_string(),
            role,
            password_hash: "salt$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_trait_user_roundtrip() {
        let db = test_db().await;
        let id = db
            .create_user(&new_user("salka@qamus.mr", Role::Moderator))
            .await
            .unwrap();
        let user = db.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.email, "salka@qamus.mr");
        assert_eq!(user.role, Role::Moderator);

        assert!(db.set_user_role(id, Role::Admin).await.unwrap());
        let user = db.get_user_by_email("SALKA@qamus.mr").await.unwrap().unwrap();
        assert_eq!(user.role, Role::Admin);

        assert!(!db.set_user_role(999, Role::Admin).await.unwrap());
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_trait_word_lifecycle() {
        let db = test_db().await;
        let uid = db
            .create_user(&new_user("a@qamus.mr", Role::Contributor))
            .await
            .unwrap();
        let word = db
            .insert_word(&NewWord {
                term: "mashi".to_string(),
                definition: "walking".to_string(),
                part_of_speech: Some("verb".to_string()),
                example: None,
                created_by: uid,
            })
            .await
            .unwrap();

        let edited = db
            .update_word(
                word.id,
                &WordEdit {
                    term: "mashi".to_string(),
                    definition: "going, walking".to_string(),
                    part_of_speech: Some("verb".to_string()),
                    example: Some("ana mashi".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edited.definition, "going, walking");
        assert_eq!(edited.example.as_deref(), Some("ana mashi"));

        let kept = db
            .update_word(
                word.id,
                &WordEdit {
                    term: "mashi".to_string(),
                    definition: "walking".to_string(),
                    part_of_speech: Some(String::new()),
                    example: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.part_of_speech, None);
        assert_eq!(kept.example.as_deref(), Some("ana mashi"));

        let flagged = db.set_challenge_word(word.id, true).await.unwrap().unwrap();
        assert!(flagged.is_challenge_word);

        assert_eq!(db.all_terms().await.unwrap(), vec!["mashi".to_string()]);
        assert_eq!(db.list_words_by_creator(uid).await.unwrap().len(), 1);
        assert_eq!(
            db.list_words(Some(WordStatus::Approved)).await.unwrap().len(),
            0
        );
        assert!(db.update_word(999, &WordEdit {
            term: "x".to_string(),
            definition: "y".to_string(),
            part_of_speech: None,
            example: None,
        })
        .await
        .unwrap()
        .is_none());
    }

    #[tokio::test]
    async fn test_trait_rewards() {
        let db = test_db().await;
        assert!(db.get_reward(1).await.unwrap().is_none());
        assert_eq!(db.add_points(1, 10).await.unwrap(), 10);
        assert_eq!(db.add_points(1, -5).await.unwrap(), 5);
        assert_eq!(db.get_reward(1).await.unwrap().unwrap().points, 5);
        assert_eq!(db.top_contributors(5).await.unwrap().len(), 1);
    }
}
