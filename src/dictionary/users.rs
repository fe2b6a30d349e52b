// Accounts: registration, login, roles and the profile view.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::password::{hash_password, verify_password};
use super::rewards::ContributorLevel;
use super::{CurrentUser, DictResult, DictionaryError};
use crate::db::models::{NewUser, Reward, Role, User};
use crate::db::Database;

pub const MIN_PASSWORD_LEN: usize = 8;

/// What a signed-in user sees about themselves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: String,
    pub rewards: Reward,
    pub level: ContributorLevel,
}

fn validate_account(email: &str, name: &str, password: &str) -> DictResult<()> {
    let email = email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid_email {
        return Err(DictionaryError::validation("A valid email address is required"));
    }
    if name.trim().is_empty() {
        return Err(DictionaryError::validation("Name is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DictionaryError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Create an account with any role. Used by `register` and by the CLI to
/// bootstrap the first administrator.
pub async fn create_user(
    db: &Arc<dyn Database>,
    email: &str,
    name: &str,
    password: &str,
    role: Role,
) -> DictResult<User> {
    validate_account(email, name, password)?;

    if db.get_user_by_email(email).await?.is_some() {
        return Err(DictionaryError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let id = db
        .create_user(&NewUser {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            role,
            password_hash: hash_password(password),
        })
        .await?;
    info!(user_id = id, role = %role, "Created user");

    db.get_user(id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("User not found"))
}

/// Self-service sign-up. New accounts are always contributors.
pub async fn register(
    db: &Arc<dyn Database>,
    email: &str,
    name: &str,
    password: &str,
) -> DictResult<User> {
    create_user(db, email, name, password, Role::Contributor).await
}

/// Check credentials. The error doesn't say which half was wrong.
pub async fn authenticate(db: &Arc<dyn Database>, email: &str, password: &str) -> DictResult<User> {
    let invalid = || DictionaryError::Unauthenticated("Invalid email or password".to_string());

    let user = db.get_user_by_email(email).await?.ok_or_else(invalid)?;
    if !verify_password(password, &user.password_hash) {
        return Err(invalid());
    }
    Ok(user)
}

/// Resolve a session's user ID to the acting user.
pub async fn resolve(db: &Arc<dyn Database>, user_id: i64) -> DictResult<CurrentUser> {
    match db.get_user(user_id).await? {
        Some(user) => Ok(CurrentUser::from(&user)),
        None => Err(DictionaryError::Unauthenticated(
            "Your account no longer exists".to_string(),
        )),
    }
}

fn require_admin(actor: &CurrentUser) -> DictResult<()> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(DictionaryError::forbidden("Administrator rights are required"))
    }
}

pub async fn list_users(db: &Arc<dyn Database>, actor: &CurrentUser) -> DictResult<Vec<User>> {
    require_admin(actor)?;
    Ok(db.list_users().await?)
}

/// Change another user's role. Admin only.
pub async fn set_role(
    db: &Arc<dyn Database>,
    actor: &CurrentUser,
    user_id: i64,
    role: Role,
) -> DictResult<User> {
    require_admin(actor)?;

    if !db.set_user_role(user_id, role).await? {
        return Err(DictionaryError::not_found("User not found"));
    }
    info!(admin = actor.id, user_id, role = %role, "Changed user role");

    db.get_user(user_id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("User not found"))
}

/// The caller's account together with their points and badges.
/// Users who never earned anything get an empty reward record.
pub async fn profile(db: &Arc<dyn Database>, actor: &CurrentUser) -> DictResult<Profile> {
    let user = db
        .get_user(actor.id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Profile not found"))?;
    let rewards = db.get_reward(actor.id).await?.unwrap_or_default();
    let counts = db.word_counts(Some(actor.id)).await?;

    Ok(Profile {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
        created_at: user.created_at,
        rewards,
        level: ContributorLevel::from_word_count(counts.total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let db = crate::db::in_memory().unwrap();
        let user = register(&db, "salka@qamus.mr", "Salka", "s3cret-pass")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Contributor);

        let again = authenticate(&db, "SALKA@qamus.mr", "s3cret-pass").await.unwrap();
        assert_eq!(again.id, user.id);

        let wrong = authenticate(&db, "salka@qamus.mr", "nope-nope").await;
        assert!(matches!(wrong, Err(DictionaryError::Unauthenticated(_))));
        let missing = authenticate(&db, "ghost@qamus.mr", "s3cret-pass").await;
        assert!(matches!(missing, Err(DictionaryError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_register_validation_and_conflict() {
        let db = crate::db::in_memory().unwrap();
        let bad_email = register(&db, "not-an-email", "X", "longenough").await;
        assert!(matches!(bad_email, Err(DictionaryError::Validation(_))));
        let short = register(&db, "a@qamus.mr", "X", "short").await;
        assert!(matches!(short, Err(DictionaryError::Validation(_))));
        let no_name = register(&db, "a@qamus.mr", "  ", "longenough").await;
        assert!(matches!(no_name, Err(DictionaryError::Validation(_))));

        register(&db, "a@qamus.mr", "A", "longenough").await.unwrap();
        let dup = register(&db, "A@qamus.mr", "B", "longenough").await;
        assert!(matches!(dup, Err(DictionaryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_only_admin_changes_roles() {
        let db = crate::db::in_memory().unwrap();
        let admin = create_user(&db, "admin@qamus.mr", "Admin", "adminpass", Role::Admin)
            .await
            .unwrap();
        let user = register(&db, "u@qamus.mr", "U", "userpass1").await.unwrap();

        let as_user = CurrentUser::from(&user);
        let denied = set_role(&db, &as_user, user.id, Role::Admin).await;
        assert!(matches!(denied, Err(DictionaryError::Forbidden(_))));
        assert!(matches!(
            list_users(&db, &as_user).await,
            Err(DictionaryError::Forbidden(_))
        ));

        let as_admin = CurrentUser::from(&admin);
        let promoted = set_role(&db, &as_admin, user.id, Role::Moderator)
            .await
            .unwrap();
        assert_eq!(promoted.role, Role::Moderator);
        assert!(matches!(
            set_role(&db, &as_admin, 999, Role::Moderator).await,
            Err(DictionaryError::NotFound(_))
        ));
        assert_eq!(list_users(&db, &as_admin).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_profile_defaults_rewards() {
        let db = crate::db::in_memory().unwrap();
        let user = register(&db, "p@qamus.mr", "P", "password").await.unwrap();
        let profile = profile(&db, &CurrentUser::from(&user)).await.unwrap();
        assert_eq!(profile.rewards.points, 0);
        assert!(profile.rewards.badges.is_empty());
        assert_eq!(profile.level, ContributorLevel::Beginner);
    }
}
