// Dictionary services: the operations behind every API route and CLI
// command: submitting and editing entries, moderation, rewards, accounts
// and public statistics.
//
// Functions take the shared `Arc<dyn Database>` plus, where permissions
// matter, the `CurrentUser` acting. Role checks live here rather than in
// the web layer so the CLI gets the same rules.

pub mod analysis;
pub mod error;
pub mod moderation;
pub mod password;
pub mod rewards;
pub mod stats;
pub mod users;
pub mod words;

pub use error::{DictResult, DictionaryError};

use crate::db::models::{Role, User};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

/// Trim an optional free-text field, treating blank as absent.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
