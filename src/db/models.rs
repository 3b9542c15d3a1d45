use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{FromRow, Postgres};

/// Privilege tier of a bot user, stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
    Moderator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::Moderator => "MODERATOR",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            "MODERATOR" => Ok(UserRole::Moderator),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

impl sqlx::Type<Postgres> for UserRole {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for UserRole {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for UserRole {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        UserRole::from_str(s).map_err(Into::into)
    }
}

/// A row of the `users` table. `user_id` is the caller-facing key;
/// `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub user_id: i64,
    pub username: Option<String>,
    pub language: String,
    pub role: UserRole,
    pub is_alive: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub user_id: i64,
    pub username: Option<String>,
    pub language: String,
    pub role: UserRole,
    pub is_alive: bool,
    pub banned: bool,
}

impl NewUser {
    pub fn new(user_id: i64, username: Option<String>) -> Self {
        Self {
            user_id,
            username,
            language: "ru".to_string(),
            role: UserRole::User,
            is_alive: true,
            banned: false,
        }
    }
}

/// One row of the activity aggregate: total actions of a user across all days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ActivityTotal {
    pub user_id: i64,
    pub total_actions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new(42, Some("alice".to_string()));
        assert_eq!(user.user_id, 42);
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.language, "ru");
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_alive);
        assert!(!user.banned);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::User, UserRole::Admin, UserRole::Moderator] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert!("OWNER".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Moderator).unwrap(),
            "\"MODERATOR\""
        );
        let role: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
