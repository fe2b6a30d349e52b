use std::env;

use anyhow::Result;

use crate::dictionary::stats::DEFAULT_CHALLENGE_TARGET;
use crate::variants::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Central configuration loaded from environment variables.
///
/// Secrets only ever come from the environment. The .env file is loaded
/// at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Approved words needed to complete the collection challenge
    pub challenge_target: i64,
    /// Key for the variant generator. Empty disables generation.
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Secret for HMAC session token signing (QAMUS_SESSION_SECRET)
    #[cfg(feature = "web")]
    pub session_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing here is mandatory. Operations that need a value call the
    /// matching `require_*` method first.
    pub fn load() -> Result<Self> {
        let challenge_target = match env::var("QAMUS_CHALLENGE_TARGET") {
            Ok(raw) => raw.trim().parse::<i64>().map_err(|_| {
                anyhow::anyhow!("QAMUS_CHALLENGE_TARGET must be a whole number, got {raw:?}")
            })?,
            Err(_) => DEFAULT_CHALLENGE_TARGET,
        };

        Ok(Self {
            db_path: env::var("QAMUS_DB_PATH").unwrap_or_else(|_| "./qamus.db".to_string()),
            challenge_target,
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            #[cfg(feature = "web")]
            session_secret: env::var("QAMUS_SESSION_SECRET").unwrap_or_default(),
        })
    }

    /// Check that a session secret is configured.
    /// Call this before starting the web server.
    #[cfg(feature = "web")]
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "QAMUS_SESSION_SECRET not set. Add a long random string to your .env file.\n\
                 Generate one with: openssl rand -hex 32"
            );
        }
        Ok(())
    }

    pub fn openai_enabled(&self) -> bool {
        !self.openai_api_key.is_empty()
    }
}
