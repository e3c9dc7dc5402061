//! Tutor profile model. A profile's id is the tutor's user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TutorProfile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub bio: String,
    pub subjects: serde_json::Value,
    pub hourly_rate: f64,
    pub experience_years: i32,
    pub education: String,
    pub rating: f64,
    pub review_count: i32,
    pub total_sessions: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Query filters for the public tutor directory.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TutorFilters {
    /// Case-insensitive match against name or any subject.
    pub search: Option<String>,
}

impl TutorFilters {
    /// ILIKE pattern for the search term, if one was given.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"))
    }
}
