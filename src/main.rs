use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use qamus::config::Config;
use qamus::db::models::{Role, WordStatus};
use qamus::db::Database;
use qamus::dictionary::{self, CurrentUser};
use qamus::extract::{extract_words, tokenize, KnownTerms};
use qamus::output::terminal;

/// Qamus: a collaborative Hassaniya dictionary.
///
/// Contributors submit entries, moderators review them, and the word
/// extractor finds vocabulary the dictionary doesn't have yet.
#[derive(Parser)]
#[command(name = "qamus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Extract candidate words from a text file
    Extract {
        /// Path to a UTF-8 text file
        file: String,

        /// Also list words that are already in the dictionary
        #[arg(long)]
        show_existing: bool,
    },

    /// List dictionary entries
    Words {
        /// Only show entries with this status (pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,
    },

    /// Approve a pending entry
    Approve {
        id: i64,

        /// Email of the moderator or admin acting
        #[arg(long = "as")]
        actor: String,
    },

    /// Reject an entry
    Reject {
        id: i64,

        /// Email of the moderator or admin acting
        #[arg(long = "as")]
        actor: String,
    },

    /// Show public dictionary statistics
    Stats,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Show system status (DB size, entry counts, configuration)
    Status,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create an account
    Add {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        password: String,

        /// contributor, moderator or admin
        #[arg(long, default_value = "contributor")]
        role: String,
    },

    /// Change an account's role
    Role { email: String, role: String },

    /// List every account
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("qamus=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Qamus database...");
            let db = qamus::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: create an administrator:");
            println!("  qamus user add --email you@example.com --name You --password ... --role admin");
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let db = qamus::db::initialize_sqlite(&config.db_path)?;
            qamus::web::run_server(config, db, port, &bind).await?;
        }

        Commands::Extract {
            file,
            show_existing,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {file}"))?;

            // Without a database every word counts as new.
            let known: KnownTerms = if qamus::status::database_exists(&config) {
                let db = qamus::db::open_sqlite(&config.db_path)?;
                db.all_terms().await?.into_iter().collect()
            } else {
                println!(
                    "{}",
                    "No database found, treating every word as new.".dimmed()
                );
                KnownTerms::default()
            };

            let report = qamus::extract::analyze(&text, &known)?;
            let existing = show_existing.then(|| {
                extract_words(&tokenize(&text))
                    .into_iter()
                    .filter(|w| known.contains(&w.term))
                    .collect::<Vec<_>>()
            });
            terminal::display_extraction_report(&report, existing.as_deref());
        }

        Commands::Words { status } => {
            let status = match status.as_deref() {
                None => None,
                Some(raw) => Some(
                    WordStatus::parse(raw)
                        .with_context(|| format!("Unknown status: {raw}"))?,
                ),
            };
            let db = qamus::db::open_sqlite(&config.db_path)?;
            let words = dictionary::words::list_words(&db, status).await?;
            terminal::display_word_list(&words);
        }

        Commands::Approve { id, actor } => {
            let db = qamus::db::open_sqlite(&config.db_path)?;
            let actor = acting_user(&db, &actor).await?;
            let word = dictionary::moderation::approve_word(&db, &actor, id).await?;
            println!("{} {} ({})", "Approved".green().bold(), word.term, word.id);
        }

        Commands::Reject { id, actor } => {
            let db = qamus::db::open_sqlite(&config.db_path)?;
            let actor = acting_user(&db, &actor).await?;
            let word = dictionary::moderation::reject_word(&db, &actor, id).await?;
            println!("{} {} ({})", "Rejected".red().bold(), word.term, word.id);
        }

        Commands::Stats => {
            let db = qamus::db::open_sqlite(&config.db_path)?;
            let stats = dictionary::stats::public_stats(&db, config.challenge_target).await?;
            terminal::display_public_stats(&stats);
        }

        Commands::User { command } => {
            let db = qamus::db::open_sqlite(&config.db_path)?;
            run_user_command(&db, command).await?;
        }

        Commands::Status => {
            if !qamus::status::database_exists(&config) {
                println!("Database: not initialized");
                println!("\nRun `qamus init` to set up the database.");
                return Ok(());
            }
            let db = qamus::db::open_sqlite(&config.db_path)?;
            qamus::status::show(&db, &config).await?;
        }
    }

    Ok(())
}

async fn run_user_command(db: &Arc<dyn Database>, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::Add {
            email,
            name,
            password,
            role,
        } => {
            let role = parse_role(&role)?;
            let user = dictionary::users::create_user(db, &email, &name, &password, role).await?;
            println!(
                "Created {} {} ({})",
                user.role.as_str().cyan(),
                user.email,
                user.id
            );
        }

        UserCommands::Role { email, role } => {
            let role = parse_role(&role)?;
            let user = db
                .get_user_by_email(&email)
                .await?
                .with_context(|| format!("No user with email {email}"))?;
            // Whoever runs the CLI already has the database file, so they act
            // as an administrator with no account of their own.
            let operator = CurrentUser {
                id: 0,
                role: Role::Admin,
            };
            let updated = dictionary::users::set_role(db, &operator, user.id, role).await?;
            println!("{} is now {}", updated.email, updated.role.as_str().cyan());
        }

        UserCommands::List => {
            let users = db.list_users().await?;
            terminal::display_user_list(&users);
        }
    }
    Ok(())
}

/// Look up the account a moderation command runs as.
async fn acting_user(db: &Arc<dyn Database>, email: &str) -> Result<CurrentUser> {
    let user = db
        .get_user_by_email(email)
        .await?
        .with_context(|| format!("No user with email {email}"))?;
    Ok(CurrentUser::from(&user))
}

fn parse_role(raw: &str) -> Result<Role> {
    Role::parse(raw).with_context(|| {
        format!("Unknown role: {raw} (expected contributor, moderator or admin)")
    })
}
