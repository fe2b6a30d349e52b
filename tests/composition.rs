// Composition tests: the dictionary services chained together on an
// in-memory SQLite database.
//
//   register -> submit -> analyze text -> moderate -> stats
//
// No network calls and no files on disk.

use std::sync::Arc;

use qamus::db::models::{Role, WordStatus};
use qamus::db::Database;
use qamus::dictionary::rewards::ContributorLevel;
use qamus::dictionary::stats::ANONYMOUS_CONTRIBUTOR;
use qamus::dictionary::words::EntryInput;
use qamus::dictionary::{
    analysis, moderation, stats, users, words, CurrentUser, DictionaryError,
};

async fn setup() -> (Arc<dyn Database>, CurrentUser, CurrentUser, CurrentUser) {
    let db = qamus::db::in_memory().unwrap();
    let admin = users::create_user(&db, "admin@qamus.mr", "Admin", "adminpass", Role::Admin)
        .await
        .unwrap();
    let moderator = users::create_user(&db, "mod@qamus.mr", "Mariem", "modpass12", Role::Moderator)
        .await
        .unwrap();
    let contributor = users::register(&db, "sidi@qamus.mr", "Sidi", "sidipass")
        .await
        .unwrap();
    (
        db,
        CurrentUser::from(&admin),
        CurrentUser::from(&moderator),
        CurrentUser::from(&contributor),
    )
}

// ============================================================
// Chain: submit -> analyze
// ============================================================

#[tokio::test]
async fn submitted_words_become_known_to_the_extractor() {
    let (db, _, _, sidi) = setup().await;
    let text = "Atay zein, atay hlou. Lebn barid.";

    let before = analysis::analyze_text(&db, text).await.unwrap();
    assert_eq!(before.total_extracted, 5);
    assert_eq!(before.existing_words, 0);

    // Pending entries count as known too.
    words::submit_word(&db, &sidi, EntryInput::new("Atay", "tea"))
        .await
        .unwrap();
    words::submit_word(&db, &sidi, EntryInput::new("lebn", "milk"))
        .await
        .unwrap();

    let after = analysis::analyze_text(&db, text).await.unwrap();
    assert_eq!(after.total_extracted, 5);
    assert_eq!(after.existing_words, 2);
    let new_terms: Vec<&str> = after.new_words.iter().map(|w| w.term.as_str()).collect();
    assert_eq!(new_terms, vec!["zein", "hlou", "barid"]);
}

#[tokio::test]
async fn saving_an_extracted_word_removes_it_from_new_words() {
    let (db, _, _, sidi) = setup().await;
    let report = analysis::analyze_text(&db, "khaima kbira").await.unwrap();
    let picked = &report.new_words[0];

    let input = EntryInput {
        comment: Some(picked.context.clone()),
        ..EntryInput::new(picked.term.clone(), "tent")
    };
    words::submit_word(&db, &sidi, input).await.unwrap();

    let again = analysis::analyze_text(&db, "khaima kbira").await.unwrap();
    assert_eq!(again.existing_words, 1);
    assert_eq!(again.new_words[0].term, "kbira");
}

// ============================================================
// Chain: submit -> moderate -> rewards -> stats
// ============================================================

#[tokio::test]
async fn moderation_flows_into_rewards_and_public_stats() {
    let (db, admin, moderator, sidi) = setup().await;

    let mut ids = Vec::new();
    for (term, def) in [("jmel", "camel"), ("naga", "she-camel"), ("bil", "camels")] {
        let w = words::submit_word(&db, &sidi, EntryInput::new(term, def))
            .await
            .unwrap();
        ids.push(w.id);
    }

    // Contributors can't moderate.
    let denied = moderation::approve_word(&db, &sidi, ids[0]).await;
    assert!(matches!(denied, Err(DictionaryError::Forbidden(_))));

    moderation::approve_word(&db, &moderator, ids[0]).await.unwrap();
    moderation::approve_word(&db, &admin, ids[1]).await.unwrap();
    moderation::reject_word(&db, &moderator, ids[2]).await.unwrap();

    let mine = words::my_words(&db, &sidi).await.unwrap();
    assert_eq!(mine.stats.total_words, 3);
    assert_eq!(mine.stats.approved_words, 2);
    assert_eq!(mine.stats.pending_words, 0);
    // 3 submissions + 2 approvals
    assert_eq!(mine.stats.points, 3 * 10 + 2 * 15);

    let public = stats::public_stats(&db, 4).await.unwrap();
    assert_eq!(public.total_words, 3);
    assert_eq!(public.approved_words, 2);
    assert_eq!(public.pending_words, 0);
    assert_eq!(public.unique_contributors, 1);
    assert_eq!(public.recent_words.len(), 2);
    assert!(public.recent_words.iter().all(|w| w.term != "bil"));
    assert_eq!(public.challenge.completed, 2);
    assert_eq!(public.challenge.percentage, 50);

    assert_eq!(public.top_contributors.len(), 1);
    assert_eq!(public.top_contributors[0].name, "Sidi");
    assert_eq!(public.top_contributors[0].points, 60);

    let approved = words::list_words(&db, Some(WordStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.len(), 2);
}

#[tokio::test]
async fn deleting_never_drops_points_below_zero() {
    let (db, _, _, sidi) = setup().await;
    let word = words::submit_word(&db, &sidi, EntryInput::new("dar", "house"))
        .await
        .unwrap();
    db.add_points(sidi.id, -10).await.unwrap();

    words::delete_word(&db, &sidi, word.id).await.unwrap();
    let profile = users::profile(&db, &sidi).await.unwrap();
    assert_eq!(profile.rewards.points, 0);
}

#[tokio::test]
async fn level_rises_with_submissions() {
    let (db, _, _, sidi) = setup().await;
    for i in 0..5 {
        words::submit_word(&db, &sidi, EntryInput::new(format!("kelma{i}"), "word"))
            .await
            .unwrap();
    }
    let profile = users::profile(&db, &sidi).await.unwrap();
    assert_eq!(profile.level, ContributorLevel::Intermediate);
    assert_eq!(profile.rewards.points, 50);
}

#[tokio::test]
async fn rewards_without_an_account_show_as_anonymous() {
    let (db, _, _, _) = setup().await;
    db.add_points(999, 7).await.unwrap();

    let public = stats::public_stats(&db, 1000).await.unwrap();
    assert_eq!(public.top_contributors[0].user_id, 999);
    assert_eq!(public.top_contributors[0].name, ANONYMOUS_CONTRIBUTOR);
}

#[tokio::test]
async fn deleting_a_word_removes_its_variants() {
    let (db, _, _, sidi) = setup().await;
    let word = words::submit_word(&db, &sidi, EntryInput::new("kteb", "to write"))
        .await
        .unwrap();
    db.insert_variant(word.id, "conjugation", "ykteb").await.unwrap();
    assert_eq!(db.list_variants(word.id).await.unwrap().len(), 1);

    words::delete_word(&db, &sidi, word.id).await.unwrap();
    assert!(db.list_variants(word.id).await.unwrap().is_empty());
}
