// Word lifecycle: submit, edit, delete, list and search entries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::rewards::{award, ContributorLevel, DELETION_PENALTY, SUBMISSION_POINTS};
use super::{clean_optional, CurrentUser, DictResult, DictionaryError};
use crate::db::models::{NewWord, Word, WordEdit, WordStatus};
use crate::db::Database;

/// Maximum rows returned by a term search.
pub const SEARCH_LIMIT: u32 = 10;

/// A dictionary entry as submitted or edited by a contributor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, alias = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    /// Free-text note kept alongside the submission. Ignored on edit.
    #[serde(default)]
    pub comment: Option<String>,
}

impl EntryInput {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            ..Self::default()
        }
    }

    /// Trim every field and check that term and definition are present.
    ///
    /// Optional fields stay `None` when absent and become `Some("")` when
    /// sent blank, so an edit can tell "keep" from "clear".
    fn validated(self) -> DictResult<(WordEdit, Option<String>)> {
        let term = self.term.trim().to_string();
        let definition = self.definition.trim().to_string();
        if term.is_empty() || definition.is_empty() {
            return Err(DictionaryError::validation("Term and definition are required"));
        }
        Ok((
            WordEdit {
                term,
                definition,
                part_of_speech: self.part_of_speech.map(|v| v.trim().to_string()),
                example: self.example.map(|v| v.trim().to_string()),
            },
            clean_optional(self.comment),
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyWordStats {
    pub total_words: i64,
    pub approved_words: i64,
    pub pending_words: i64,
    pub points: i64,
    pub level: ContributorLevel,
}

/// The caller's own entries with a summary of their standing.
#[derive(Debug, Clone, Serialize)]
pub struct MyWords {
    pub words: Vec<Word>,
    pub stats: MyWordStats,
}

/// Add a new pending entry on behalf of `actor`.
pub async fn submit_word(
    db: &Arc<dyn Database>,
    actor: &CurrentUser,
    input: EntryInput,
) -> DictResult<Word> {
    let (entry, comment) = input.validated()?;

    let word = db
        .insert_word(&NewWord {
            term: entry.term,
            definition: entry.definition,
            part_of_speech: clean_optional(entry.part_of_speech),
            example: clean_optional(entry.example),
            created_by: actor.id,
        })
        .await?;
    info!(word_id = word.id, user_id = actor.id, term = %word.term, "Submitted word");

    if let Some(comment) = comment {
        if let Err(e) = db.insert_contribution(word.id, actor.id, &comment).await {
            warn!(error = %e, word_id = word.id, "Failed to record contribution comment");
        }
    }

    award(db, actor.id, SUBMISSION_POINTS, "submission").await;
    Ok(word)
}

async fn owned_word(db: &Arc<dyn Database>, actor: &CurrentUser, id: i64) -> DictResult<Word> {
    let word = db
        .get_word(id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))?;
    if word.created_by != Some(actor.id) {
        return Err(DictionaryError::forbidden(
            "You can only change words you submitted",
        ));
    }
    Ok(word)
}

/// Edit an entry. Only its creator may do so. Optional fields left out
/// of `input` keep their stored value; a blank one clears it.
pub async fn update_word(
    db: &Arc<dyn Database>,
    actor: &CurrentUser,
    id: i64,
    input: EntryInput,
) -> DictResult<Word> {
    let (edit, _) = input.validated()?;
    owned_word(db, actor, id).await?;

    let word = db
        .update_word(id, &edit)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))?;
    info!(word_id = id, user_id = actor.id, "Updated word");
    Ok(word)
}

/// Remove an entry and take back some of the points it earned.
pub async fn delete_word(db: &Arc<dyn Database>, actor: &CurrentUser, id: i64) -> DictResult<()> {
    owned_word(db, actor, id).await?;

    if !db.delete_word(id).await? {
        return Err(DictionaryError::not_found("Word not found"));
    }
    info!(word_id = id, user_id = actor.id, "Deleted word");

    award(db, actor.id, -DELETION_PENALTY, "deletion").await;
    Ok(())
}

pub async fn get_word(db: &Arc<dyn Database>, id: i64) -> DictResult<Word> {
    db.get_word(id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))
}

pub async fn list_words(
    db: &Arc<dyn Database>,
    status: Option<WordStatus>,
) -> DictResult<Vec<Word>> {
    Ok(db.list_words(status).await?)
}

/// Term lookup for the public search box. A blank query matches nothing.
pub async fn search_words(db: &Arc<dyn Database>, query: &str) -> DictResult<Vec<Word>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    Ok(db.search_words(query, SEARCH_LIMIT).await?)
}

pub async fn my_words(db: &Arc<dyn Database>, actor: &CurrentUser) -> DictResult<MyWords> {
    let words = db.list_words_by_creator(actor.id).await?;
    let counts = db.word_counts(Some(actor.id)).await?;
    let points = db
        .get_reward(actor.id)
        .await?
        .map(|r| r.points)
        .unwrap_or(0);

    Ok(MyWords {
        words,
        stats: MyWordStats {
            total_words: counts.total,
            approved_words: counts.approved,
            pending_words: counts.pending,
            points,
            level: ContributorLevel::from_word_count(counts.total),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;

    async fn setup() -> (Arc<dyn Database>, CurrentUser, CurrentUser) {
        let db = crate::db::in_memory().unwrap();
        let a = super::super::users::register(&db, "a@qamus.mr", "A", "password1")
            .await
            .unwrap();
        let b = super::super::users::register(&db, "b@qamus.mr", "B", "password2")
            .await
            .unwrap();
        (db, CurrentUser::from(&a), CurrentUser::from(&b))
    }

    #[tokio::test]
    async fn test_submit_requires_term_and_definition() {
        let (db, a, _) = setup().await;
        let err = submit_word(&db, &a, EntryInput::new("  ", "def")).await;
        assert!(matches!(err, Err(DictionaryError::Validation(_))));
        let err = submit_word(&db, &a, EntryInput::new("term", "")).await;
        assert!(matches!(err, Err(DictionaryError::Validation(_))));
        assert!(db.list_words(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_trims_and_awards() {
        let (db, a, _) = setup().await;
        let input = EntryInput {
            part_of_speech: Some("   ".to_string()),
            comment: Some("heard in Nouakchott".to_string()),
            ..EntryInput::new("  lebn ", " milk ")
        };
        let word = submit_word(&db, &a, input).await.unwrap();
        assert_eq!(word.term, "lebn");
        assert_eq!(word.definition, "milk");
        assert_eq!(word.part_of_speech, None);
        assert_eq!(word.status, WordStatus::Pending);
        assert_eq!(word.created_by, Some(a.id));
        assert_eq!(db.get_reward(a.id).await.unwrap().unwrap().points, 10);
    }

    #[tokio::test]
    async fn test_only_creator_edits_and_deletes() {
        let (db, a, b) = setup().await;
        let word = submit_word(&db, &a, EntryInput::new("atay", "tea"))
            .await
            .unwrap();

        let err = update_word(&db, &b, word.id, EntryInput::new("atay", "green tea")).await;
        assert!(matches!(err, Err(DictionaryError::Forbidden(_))));
        let err = delete_word(&db, &b, word.id).await;
        assert!(matches!(err, Err(DictionaryError::Forbidden(_))));

        // Role doesn't grant ownership.
        let admin = CurrentUser {
            id: b.id,
            role: Role::Admin,
        };
        let err = delete_word(&db, &admin, word.id).await;
        assert!(matches!(err, Err(DictionaryError::Forbidden(_))));

        let edited = update_word(&db, &a, word.id, EntryInput::new("atay", "green tea"))
            .await
            .unwrap();
        assert_eq!(edited.definition, "green tea");

        assert_eq!(get_word(&db, word.id).await.unwrap().definition, "green tea");
        delete_word(&db, &a, word.id).await.unwrap();
        assert!(db.get_word(word.id).await.unwrap().is_none());
        assert!(matches!(
            get_word(&db, word.id).await,
            Err(DictionaryError::NotFound(_))
        ));
        assert_eq!(db.get_reward(a.id).await.unwrap().unwrap().points, 5);

        let err = delete_word(&db, &a, word.id).await;
        assert!(matches!(err, Err(DictionaryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_edit_keeps_omitted_fields() {
        let (db, a, _) = setup().await;
        let input = EntryInput {
            part_of_speech: Some("verb".to_string()),
            example: Some("ana mashi".to_string()),
            ..EntryInput::new("mashi", "walking")
        };
        let word = submit_word(&db, &a, input).await.unwrap();

        let edited = update_word(&db, &a, word.id, EntryInput::new("mashi", "going"))
            .await
            .unwrap();
        assert_eq!(edited.definition, "going");
        assert_eq!(edited.part_of_speech.as_deref(), Some("verb"));
        assert_eq!(edited.example.as_deref(), Some("ana mashi"));

        let cleared = EntryInput {
            example: Some("  ".to_string()),
            ..EntryInput::new("mashi", "going")
        };
        let edited = update_word(&db, &a, word.id, cleared).await.unwrap();
        assert_eq!(edited.example, None);
        assert_eq!(edited.part_of_speech.as_deref(), Some("verb"));
    }

    #[tokio::test]
    async fn test_search_blank_query_is_empty() {
        let (db, a, _) = setup().await;
        submit_word(&db, &a, EntryInput::new("zrig", "sweetened milk drink"))
            .await
            .unwrap();
        assert!(search_words(&db, "   ").await.unwrap().is_empty());
        assert_eq!(search_words(&db, "ZR").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_my_words_stats() {
        let (db, a, b) = setup().await;
        for term in ["bitha", "khaima", "dar"] {
            submit_word(&db, &a, EntryInput::new(term, "dwelling"))
                .await
                .unwrap();
        }
        submit_word(&db, &b, EntryInput::new("jmel", "camel"))
            .await
            .unwrap();

        let mine = my_words(&db, &a).await.unwrap();
        assert_eq!(mine.words.len(), 3);
        assert_eq!(mine.words[0].term, "dar");
        assert_eq!(mine.stats.total_words, 3);
        assert_eq!(mine.stats.pending_words, 3);
        assert_eq!(mine.stats.approved_words, 0);
        assert_eq!(mine.stats.points, 30);
        assert_eq!(mine.stats.level, ContributorLevel::Beginner);
    }
}
