// Colored terminal output for word lists, extraction reports and stats.
//
// main.rs does the data fetching; everything that prints a table lives here.

use colored::{ColoredString, Colorize};

use super::truncate_chars;
use crate::db::models::{User, Word, WordStatus};
use crate::dictionary::stats::PublicStats;
use crate::extract::{ExtractedWord, ExtractionReport};

fn colorize_status(status: WordStatus) -> ColoredString {
    match status {
        WordStatus::Approved => status.as_str().green(),
        WordStatus::Pending => status.as_str().yellow(),
        WordStatus::Rejected => status.as_str().red(),
    }
}

/// Display the outcome of running the extractor over a text.
///
/// New words are always listed. Terms already in the dictionary are only
/// counted unless `existing` is supplied.
pub fn display_extraction_report(report: &ExtractionReport, existing: Option<&[ExtractedWord]>) {
    println!(
        "\n{}",
        format!("=== Extracted {} distinct words ===", report.total_extracted).bold()
    );
    println!(
        "  {} new, {} already in the dictionary",
        report.new_words.len().to_string().green().bold(),
        report.existing_words.to_string().dimmed(),
    );

    if report.new_words.is_empty() {
        println!("\nNo new words found.");
    } else {
        println!("\n{}", "New words".bold());
        print_extracted(&report.new_words);
    }

    if let Some(existing) = existing.filter(|e| !e.is_empty()) {
        println!("\n{}", "Already in the dictionary".bold());
        print_extracted(existing);
    }
}

fn print_extracted(words: &[ExtractedWord]) {
    println!(
        "  {:<24} {:>5}  {}",
        "Term".dimmed(),
        "Freq".dimmed(),
        "Context".dimmed()
    );
    println!("  {}", "-".repeat(72).dimmed());
    for w in words {
        println!(
            "  {:<24} {:>5}  {}",
            w.term,
            w.frequency,
            truncate_chars(&w.context, 60).dimmed()
        );
    }
}

/// Display dictionary entries one per line.
pub fn display_word_list(words: &[Word]) {
    if words.is_empty() {
        println!("No words found.");
        return;
    }

    println!("\n{}", format!("=== {} words ===", words.len()).bold());
    println!(
        "  {:>5}  {:<24} {:<9} {}",
        "ID".dimmed(),
        "Term".dimmed(),
        "Status".dimmed(),
        "Definition".dimmed()
    );
    println!("  {}", "-".repeat(78).dimmed());

    for w in words {
        let challenge = if w.is_challenge_word { " *".cyan() } else { "".normal() };
        println!(
            "  {:>5}  {:<24} {:<9} {}{}",
            w.id,
            truncate_chars(&w.term, 24),
            colorize_status(w.status),
            truncate_chars(&w.definition, 40),
            challenge,
        );
    }
}

/// Display the public dashboard numbers.
pub fn display_public_stats(stats: &PublicStats) {
    println!("\n{}", "=== Dictionary ===".bold());
    println!(
        "  Words: {} total, {} approved, {} pending",
        stats.total_words,
        stats.approved_words.to_string().green(),
        stats.pending_words.to_string().yellow(),
    );
    println!("  Contributors: {}", stats.unique_contributors);

    let c = &stats.challenge;
    let filled = (c.percentage as usize) / 5;
    println!(
        "  Challenge: [{}{}] {}/{} ({}%)",
        "#".repeat(filled).green(),
        "-".repeat(20 - filled.min(20)).dimmed(),
        c.completed,
        c.total,
        c.percentage
    );

    if !stats.recent_words.is_empty() {
        println!("\n{}", "Recently approved".bold());
        for w in &stats.recent_words {
            println!(
                "  {:<24} {}",
                w.term,
                truncate_chars(&w.definition, 50).dimmed()
            );
        }
    }

    if !stats.top_contributors.is_empty() {
        println!("\n{}", "Top contributors".bold());
        for (i, t) in stats.top_contributors.iter().enumerate() {
            println!("  {:>2}. {:<28} {:>5} pts", i + 1, t.name, t.points);
        }
    }
}

/// Display registered users (admin view).
pub fn display_user_list(users: &[User]) {
    if users.is_empty() {
        println!("No users yet. Add one with `qamus user add`.");
        return;
    }
    println!(
        "  {:>5}  {:<32} {:<20} {}",
        "ID".dimmed(),
        "Email".dimmed(),
        "Name".dimmed(),
        "Role".dimmed()
    );
    for u in users {
        println!(
            "  {:>5}  {:<32} {:<20} {}",
            u.id,
            u.email,
            truncate_chars(&u.name, 20),
            u.role.as_str().cyan()
        );
    }
}
