//! User model with role-based access control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Learner,
    Tutor,
    Admin,
}

/// Full user row from database. Carries password_hash, never serialize to API.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// User response DTO without password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Self-service sign-up payload. New accounts always start as learners.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::nil(),
            email: "learner@tutorhub.test".to_string(),
            password_hash: "secret_hash".to_string(),
            display_name: "Learner".to_string(),
            role: UserRole::Learner,
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn user_role_serialization() {
        let json = serde_json::to_string(&UserRole::Tutor).unwrap();
        assert_eq!(json, "\"Tutor\"");
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse::from(sample_user())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret_hash"));
    }

    #[test]
    fn register_rejects_short_password() {
        let input = RegisterUser {
            email: "new@tutorhub.test".to_string(),
            password: "short".to_string(),
            display_name: "New".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn register_rejects_bad_email() {
        let input = RegisterUser {
            email: "not-an-email".to_string(),
            password: "long-enough-pass".to_string(),
            display_name: "New".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
