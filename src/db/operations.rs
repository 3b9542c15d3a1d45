//! Parameterized queries over the `users` and `activity` tables.
//!
//! Every function takes an executor — a `&mut PgConnection` or a handle
//! borrowed from a pool — runs exactly one statement with positional
//! binds, and logs a one-line summary of the effect. Values are never
//! interpolated into statement text.

use sqlx::PgExecutor;
use tracing::{info, warn};

use crate::db::models::{ActivityTotal, NewUser, User};
use crate::error::Error;

/// Inserts a user row. A row with the same `user_id` already present
/// makes this a silent no-op.
pub async fn add_user(executor: impl PgExecutor<'_>, user: &NewUser) -> Result<(), Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (user_id, username, language, role, is_alive, banned)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user.user_id)
    .bind(user.username.as_deref())
    .bind(user.language.as_str())
    .bind(user.role)
    .bind(user.is_alive)
    .bind(user.banned)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        info!("User {} already exists, insert skipped", user.user_id);
    } else {
        info!(
            "User {} added: username={:?}, language={}, role={}, is_alive={}, banned={}",
            user.user_id,
            user.username,
            user.language,
            user.role.as_str(),
            user.is_alive,
            user.banned
        );
    }
    Ok(())
}

/// Fetches the full user row. An absent `user_id` is not an error.
pub async fn get_user(executor: impl PgExecutor<'_>, user_id: i64) -> Result<Option<User>, Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, user_id, username, language, role, is_alive, banned, created_at
        FROM users
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    info!("Fetched user {}: found={}", user_id, user.is_some());
    Ok(user)
}

/// Updates the language of a user. No existence check: an absent
/// `user_id` makes this a silent no-op.
pub async fn change_user_language(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    language: &str,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET language = $1 WHERE user_id = $2")
        .bind(language)
        .bind(user_id)
        .execute(executor)
        .await?;

    info!("Language {} set for user {}", language, user_id);
    Ok(())
}

pub async fn get_user_language(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Option<String>, Error> {
    let language = sqlx::query_scalar::<_, String>("SELECT language FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

    match &language {
        Some(language) => info!("User {} has language {}", user_id, language),
        None => warn!("No user with user_id={} found in the database", user_id),
    }
    Ok(language)
}

pub async fn change_user_alive_status(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    is_alive: bool,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET is_alive = $1 WHERE user_id = $2")
        .bind(is_alive)
        .bind(user_id)
        .execute(executor)
        .await?;

    info!("User {} is_alive status changed to {}", user_id, is_alive);
    Ok(())
}

pub async fn change_user_banned_status_by_name(
    executor: impl PgExecutor<'_>,
    username: &str,
    banned: bool,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET banned = $1 WHERE username = $2")
        .bind(banned)
        .bind(username)
        .execute(executor)
        .await?;

    info!("User {} banned status changed to {}", username, banned);
    Ok(())
}

pub async fn change_user_banned_status_by_id(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    banned: bool,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET banned = $1 WHERE user_id = $2")
        .bind(banned)
        .bind(user_id)
        .execute(executor)
        .await?;

    info!("User {} banned status changed to {}", user_id, banned);
    Ok(())
}

pub async fn get_user_alive_status(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Option<bool>, Error> {
    let is_alive = sqlx::query_scalar::<_, bool>("SELECT is_alive FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

    match is_alive {
        Some(is_alive) => info!("User {} has is_alive status {}", user_id, is_alive),
        None => warn!("No user with user_id={} found in the database", user_id),
    }
    Ok(is_alive)
}

/// Records one action for the user on the current day. The first action
/// of a day creates the `(user_id, date)` row at 1, each further action
/// increments it. The server's `CURRENT_DATE` decides the day.
pub async fn add_user_activity(executor: impl PgExecutor<'_>, user_id: i64) -> Result<(), Error> {
    sqlx::query(
        r#"
        INSERT INTO activity (user_id, date_time, actions)
        VALUES ($1, CURRENT_DATE, 1)
        ON CONFLICT (user_id, date_time)
        DO UPDATE SET actions = activity.actions + 1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;

    info!("Activity recorded for user {}", user_id);
    Ok(())
}

/// Total actions per user across all days, descending, top 5. Returns
/// `None` when the activity table holds no rows.
pub async fn get_statistics(
    executor: impl PgExecutor<'_>,
) -> Result<Option<Vec<ActivityTotal>>, Error> {
    let totals = sqlx::query_as::<_, ActivityTotal>(
        r#"
        SELECT user_id, SUM(actions) AS total_actions
        FROM activity
        GROUP BY user_id
        ORDER BY total_actions DESC
        LIMIT 5
        "#,
    )
    .fetch_all(executor)
    .await?;

    info!("Fetched activity totals for {} users", totals.len());
    if totals.is_empty() {
        Ok(None)
    } else {
        Ok(Some(totals))
    }
}
