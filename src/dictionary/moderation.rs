// Moderation: approving and rejecting submissions, flagging challenge words.

use std::sync::Arc;

use tracing::info;

use super::rewards::{award, APPROVAL_POINTS};
use super::{CurrentUser, DictResult, DictionaryError};
use crate::db::models::{Word, WordStatus};
use crate::db::Database;

fn require_moderator(actor: &CurrentUser) -> DictResult<()> {
    if actor.role.can_moderate() {
        Ok(())
    } else {
        Err(DictionaryError::forbidden(
            "Only moderators and administrators can review words",
        ))
    }
}

async fn review(
    db: &Arc<dyn Database>,
    actor: &CurrentUser,
    id: i64,
    status: WordStatus,
) -> DictResult<Word> {
    require_moderator(actor)?;

    let (previous, word) = db
        .set_word_status(id, status)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))?;
    info!(
        word_id = id,
        moderator = actor.id,
        from = %previous,
        to = %status,
        "Reviewed word"
    );

    // Creator points are paid once, when the entry first becomes approved.
    if status == WordStatus::Approved && previous != WordStatus::Approved {
        if let Some(creator) = word.created_by {
            award(db, creator, APPROVAL_POINTS, "approval").await;
        }
    }

    Ok(word)
}

pub async fn approve_word(db: &Arc<dyn Database>, actor: &CurrentUser, id: i64) -> DictResult<Word> {
    review(db, actor, id, WordStatus::Approved).await
}

pub async fn reject_word(db: &Arc<dyn Database>, actor: &CurrentUser, id: i64) -> DictResult<Word> {
    review(db, actor, id, WordStatus::Rejected).await
}

/// Mark or unmark a word as counting toward the collection challenge.
/// Admin only.
pub async fn set_challenge_word(
    db: &Arc<dyn Database>,
    actor: &CurrentUser,
    id: i64,
    flag: bool,
) -> DictResult<Word> {
    if !actor.role.is_admin() {
        return Err(DictionaryError::forbidden(
            "Only administrators can manage challenge words",
        ));
    }

    let word = db
        .set_challenge_word(id, flag)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))?;
    info!(word_id = id, admin = actor.id, flag, "Updated challenge flag");
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;
    use crate::dictionary::users::{create_user, register};
    use crate::dictionary::words::{submit_word, EntryInput};

    #[tokio::test]
    async fn test_approval_pays_creator_once() {
        let db = crate::db::in_memory().unwrap();
        let author = register(&db, "author@qamus.mr", "Author", "password")
            .await
            .unwrap();
        let moderator = create_user(&db, "mod@qamus.mr", "Mod", "password", Role::Moderator)
            .await
            .unwrap();
        let author = CurrentUser::from(&author);
        let moderator = CurrentUser::from(&moderator);

        let word = submit_word(&db, &author, EntryInput::new("lehmar", "the red one"))
            .await
            .unwrap();

        let denied = approve_word(&db, &author, word.id).await;
        assert!(matches!(denied, Err(DictionaryError::Forbidden(_))));

        let approved = approve_word(&db, &moderator, word.id).await.unwrap();
        assert_eq!(approved.status, WordStatus::Approved);
        approve_word(&db, &moderator, word.id).await.unwrap();
        assert_eq!(db.get_reward(author.id).await.unwrap().unwrap().points, 25);

        // Rejecting and approving again is a new transition.
        reject_word(&db, &moderator, word.id).await.unwrap();
        assert_eq!(db.get_reward(author.id).await.unwrap().unwrap().points, 25);
        approve_word(&db, &moderator, word.id).await.unwrap();
        assert_eq!(db.get_reward(author.id).await.unwrap().unwrap().points, 40);

        let missing = reject_word(&db, &moderator, 4242).await;
        assert!(matches!(missing, Err(DictionaryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_challenge_flag_admin_only() {
        let db = crate::db::in_memory().unwrap();
        let admin = create_user(&db, "admin@qamus.mr", "Admin", "password", Role::Admin)
            .await
            .unwrap();
        let moderator = create_user(&db, "mod@qamus.mr", "Mod", "password", Role::Moderator)
            .await
            .unwrap();
        let admin = CurrentUser::from(&admin);
        let moderator = CurrentUser::from(&moderator);

        let word = submit_word(&db, &admin, EntryInput::new("sahra", "desert"))
            .await
            .unwrap();

        let denied = set_challenge_word(&db, &moderator, word.id, true).await;
        assert!(matches!(denied, Err(DictionaryError::Forbidden(_))));

        let flagged = set_challenge_word(&db, &admin, word.id, true).await.unwrap();
        assert!(flagged.is_challenge_word);
    }
}
