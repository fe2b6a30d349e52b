// Database queries: CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{
    NewUser, NewWord, Reward, Role, TopContributor, User, Word, WordCounts, WordEdit, WordStatus,
    WordVariant,
};

const USER_COLUMNS: &str = "id, email, name, role, password_hash, created_at";

const WORD_COLUMNS: &str = "id, term, definition, part_of_speech, example, status, created_by,
                            is_challenge_word, created_at, updated_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        // Unknown roles from hand-edited rows get the least privilege
        role: Role::parse(&role).unwrap_or(Role::Contributor),
        password_hash: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn row_to_word(row: &Row<'_>) -> rusqlite::Result<Word> {
    let status: String = row.get(5)?;
    Ok(Word {
        id: row.get(0)?,
        term: row.get(1)?,
        definition: row.get(2)?,
        part_of_speech: row.get(3)?,
        example: row.get(4)?,
        status: WordStatus::parse(&status).unwrap_or(WordStatus::Pending),
        created_by: row.get(6)?,
        is_challenge_word: row.get::<_, i32>(7)? != 0,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn parse_badges(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// --- Users ---

/// Insert a new user and return its ID.
pub fn create_user(conn: &Connection, user: &NewUser) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (email, name, role, password_hash) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.email.trim(),
            user.name.trim(),
            user.role.as_str(),
            user.password_hash
        ],
    )
    .with_context(|| format!("Failed to create user {}", user.email))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    let user = conn.query_row(&sql, params![id], row_to_user).optional()?;
    Ok(user)
}

/// Look up a user by email (case-insensitive).
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 COLLATE NOCASE");
    let user = conn
        .query_row(&sql, params![email.trim()], row_to_user)
        .optional()?;
    Ok(user)
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_user)?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

/// Change a user's role. Returns false if the user doesn't exist.
pub fn set_user_role(conn: &Connection, id: i64, role: Role) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET role = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![role.as_str(), id],
    )?;
    Ok(changed > 0)
}

// --- Words ---

/// Insert a new pending entry and return the stored row.
pub fn insert_word(conn: &Connection, word: &NewWord) -> Result<Word> {
    conn.execute(
        "INSERT INTO words (term, definition, part_of_speech, example, status, created_by)
         VALUES (?1, ?2, ?3, ?4, 'pending', ?5)",
        params![
            word.term,
            word.definition,
            word.part_of_speech,
            word.example,
            word.created_by,
        ],
    )?;
    let id = conn.last_insert_rowid();
    get_word(conn, id)?.with_context(|| format!("Word {id} missing right after insert"))
}

pub fn get_word(conn: &Connection, id: i64) -> Result<Option<Word>> {
    let sql = format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1");
    let word = conn.query_row(&sql, params![id], row_to_word).optional()?;
    Ok(word)
}

/// All entries, optionally filtered by status, newest first.
pub fn list_words(conn: &Connection, status: Option<WordStatus>) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {WORD_COLUMNS} FROM words
         WHERE (?1 IS NULL OR status = ?1)
         ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![status.map(|s| s.as_str())], row_to_word)?;

    let mut words = Vec::new();
    for row in rows {
        words.push(row?);
    }
    Ok(words)
}

/// Entries submitted by one user, newest first.
pub fn list_words_by_creator(conn: &Connection, user_id: i64) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {WORD_COLUMNS} FROM words
         WHERE created_by = ?1
         ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_word)?;

    let mut words = Vec::new();
    for row in rows {
        words.push(row?);
    }
    Ok(words)
}

/// Case-insensitive substring search on the term.
pub fn search_words(conn: &Connection, query: &str, limit: u32) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {WORD_COLUMNS} FROM words
         WHERE term LIKE '%' || ?1 || '%' ESCAPE '\\'
         ORDER BY term, id
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![escape_like(query), limit], row_to_word)?;

    let mut words = Vec::new();
    for row in rows {
        words.push(row?);
    }
    Ok(words)
}

/// Update an entry's editable fields. Returns None if it doesn't exist.
///
/// A `None` optional field keeps the stored value and an empty one clears it.
pub fn update_word(conn: &Connection, id: i64, edit: &WordEdit) -> Result<Option<Word>> {
    let changed = conn.execute(
        "UPDATE words SET term = ?1, definition = ?2,
                part_of_speech = CASE WHEN ?3 IS NULL THEN part_of_speech ELSE NULLIF(?3, '') END,
                example = CASE WHEN ?4 IS NULL THEN example ELSE NULLIF(?4, '') END,
                updated_at = datetime('now')
         WHERE id = ?5",
        params![edit.term, edit.definition, edit.part_of_speech, edit.example, id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_word(conn, id)
}

/// Delete an entry. Variants and contribution notes go with it.
pub fn delete_word(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM words WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

/// Move an entry to a new moderation status.
///
/// Returns the status it had before together with the updated row, so the
/// caller can tell whether this call caused the transition.
pub fn set_word_status(
    conn: &Connection,
    id: i64,
    status: WordStatus,
) -> Result<Option<(WordStatus, Word)>> {
    let tx = conn.unchecked_transaction()?;

    let previous: Option<String> = tx
        .query_row("SELECT status FROM words WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    let Some(previous) = previous else {
        return Ok(None);
    };

    tx.execute(
        "UPDATE words SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    let word = get_word(&tx, id)?.with_context(|| format!("Word {id} vanished mid-update"))?;
    tx.commit()?;

    let previous = WordStatus::parse(&previous).unwrap_or(WordStatus::Pending);
    Ok(Some((previous, word)))
}

/// Flag or unflag an entry as part of the word-collection challenge.
pub fn set_challenge_word(conn: &Connection, id: i64, flag: bool) -> Result<Option<Word>> {
    let changed = conn.execute(
        "UPDATE words SET is_challenge_word = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![flag as i32, id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_word(conn, id)
}

/// Every term in the dictionary, whatever its status.
pub fn all_terms(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT term FROM words")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut terms = Vec::new();
    for row in rows {
        terms.push(row?);
    }
    Ok(terms)
}

/// Count entries by status, for the whole dictionary or one creator.
pub fn word_counts(conn: &Connection, created_by: Option<i64>) -> Result<WordCounts> {
    let counts = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(status = 'approved'), 0),
                COALESCE(SUM(status = 'pending'), 0),
                COALESCE(SUM(status = 'rejected'), 0)
         FROM words
         WHERE (?1 IS NULL OR created_by = ?1)",
        params![created_by],
        |row| {
            Ok(WordCounts {
                total: row.get(0)?,
                approved: row.get(1)?,
                pending: row.get(2)?,
                rejected: row.get(3)?,
            })
        },
    )?;
    Ok(counts)
}

/// Number of distinct users who have submitted at least one entry.
pub fn unique_contributors(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(DISTINCT created_by) FROM words WHERE created_by IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// The most recently created approved entries.
pub fn recent_approved(conn: &Connection, limit: u32) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {WORD_COLUMNS} FROM words
         WHERE status = 'approved'
         ORDER BY created_at DESC, id DESC
         LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit], row_to_word)?;

    let mut words = Vec::new();
    for row in rows {
        words.push(row?);
    }
    Ok(words)
}

// --- Contributions ---

/// Record the note a contributor left with a submission.
pub fn insert_contribution(
    conn: &Connection,
    word_id: i64,
    user_id: i64,
    comment: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO contributions (word_id, user_id, comment) VALUES (?1, ?2, ?3)",
        params![word_id, user_id, comment],
    )?;
    Ok(conn.last_insert_rowid())
}

// --- Rewards ---

/// Add (or with a negative delta, remove) points, creating the reward row
/// on first use. The total never drops below zero. Returns the new total.
pub fn add_points(conn: &Connection, user_id: i64, delta: i64) -> Result<i64> {
    let points = conn.query_row(
        "INSERT INTO rewards (user_id, points, updated_at)
         VALUES (?1, MAX(0, ?2), datetime('now'))
         ON CONFLICT(user_id) DO UPDATE SET
            points = MAX(0, points + ?2),
            updated_at = datetime('now')
         RETURNING points",
        params![user_id, delta],
        |row| row.get(0),
    )?;
    Ok(points)
}

pub fn get_reward(conn: &Connection, user_id: i64) -> Result<Option<Reward>> {
    let reward = conn
        .query_row(
            "SELECT points, badges FROM rewards WHERE user_id = ?1",
            params![user_id],
            |row| {
                let badges: String = row.get(1)?;
                Ok(Reward {
                    points: row.get(0)?,
                    badges: parse_badges(&badges),
                })
            },
        )
        .optional()?;
    Ok(reward)
}

/// Highest point totals, joined with user names where the user still exists.
pub fn top_contributors(conn: &Connection, limit: u32) -> Result<Vec<TopContributor>> {
    let mut stmt = conn.prepare(
        "SELECT r.user_id, u.name, r.points, r.badges
         FROM rewards r
         LEFT JOIN users u ON u.id = r.user_id
         ORDER BY r.points DESC, r.user_id ASC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        let badges: String = row.get(3)?;
        Ok(TopContributor {
            user_id: row.get(0)?,
            name: row.get(1)?,
            points: row.get(2)?,
            badges: parse_badges(&badges),
        })
    })?;

    let mut contributors = Vec::new();
    for row in rows {
        contributors.push(row?);
    }
    Ok(contributors)
}

// --- Variants ---

pub fn insert_variant(
    conn: &Connection,
    word_id: i64,
    variant_type: &str,
    variant: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO word_variants (word_id, variant_type, variant) VALUES (?1, ?2, ?3)",
        params![word_id, variant_type, variant],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_variants(conn: &Connection, word_id: i64) -> Result<Vec<WordVariant>> {
    let mut stmt = conn.prepare(
        "SELECT id, word_id, variant_type, variant, created_at
         FROM word_variants
         WHERE word_id = ?1
         ORDER BY id",
    )?;
    let rows = stmt.query_map(params![word_id], |row| {
        Ok(WordVariant {
            id: row.get(0)?,
            word_id: row.get(1)?,
            variant_type: row.get(2)?,
            variant: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;

    let mut variants = Vec::new();
    for row in rows {
        variants.push(row?);
    }
    Ok(variants)
}
