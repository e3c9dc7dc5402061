//! Tutor application model. Status is a plain string, as stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TutorApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub subjects: serde_json::Value,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TutorApplication {
    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitApplication {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub subjects: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
    #[validate(length(max = 500))]
    pub education: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectApplication {
    pub reason: Option<String>,
}

/// Filters for the admin application queue.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApplicationFilters {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_rejects_negative_rate() {
        let input = SubmitApplication {
            display_name: Some("Sarah".to_string()),
            bio: None,
            subjects: Some(vec!["Math".to_string()]),
            hourly_rate: Some(-5.0),
            experience_years: None,
            education: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn submit_accepts_sparse_payload() {
        let input: SubmitApplication = serde_json::from_str(r#"{"subjects":["Physics"]}"#).unwrap();
        assert!(input.validate().is_ok());
        assert!(input.display_name.is_none());
    }
}
