// System status display: database size, entry counts, contributors.

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, config: &Config) -> Result<()> {
    let db_path = &config.db_path;

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let counts = db.word_counts(None).await?;
    println!(
        "Words: {} total ({} approved, {} pending, {} rejected)",
        counts.total, counts.approved, counts.pending, counts.rejected
    );
    if counts.total == 0 {
        println!("  Submit one with the web API or `qamus serve`");
    }

    let users = db.list_users().await?;
    let admins = users.iter().filter(|u| u.role.is_admin()).count();
    println!("Users: {} ({} admin)", users.len(), admins);
    if admins == 0 {
        println!("  Create one with `qamus user add --role admin`");
    }

    if let Some(latest) = db.list_words(None).await?.first() {
        println!(
            "Last submission: {} ({})",
            latest.term,
            describe_age(&latest.created_at)
        );
    }

    println!("Contributors: {}", db.unique_contributors().await?);
    println!(
        "Challenge target: {} approved words",
        config.challenge_target
    );
    println!(
        "Variant generation: {}",
        if config.openai_enabled() {
            format!("enabled ({})", config.openai_model)
        } else {
            "disabled (OPENAI_API_KEY not set)".to_string()
        }
    );

    Ok(())
}

/// True when the database file exists. `status` reports instead of failing.
pub fn database_exists(config: &Config) -> bool {
    Path::new(&config.db_path).exists()
}

/// "3 hours ago" style age for a SQLite `datetime('now')` timestamp.
fn describe_age(timestamp: &str) -> String {
    let Ok(then) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") else {
        return timestamp.to_string();
    };
    let age = Utc::now().naive_utc() - then;
    match age.num_minutes() {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{m} min ago"),
        m if m < 60 * 24 => format!("{} hours ago", m / 60),
        m => format!("{} days ago", m / (60 * 24)),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
