//! Booking model. Status is a free-form string; amount may be missing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub tutor_id: Option<Uuid>,
    pub topic: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBooking {
    pub tutor_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Defaults to the tutor's hourly rate when omitted.
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBookingStatus {
    #[validate(length(min = 1, max = 50))]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BookingFilters {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_booking_requires_topic() {
        let input = CreateBooking {
            tutor_id: Uuid::nil(),
            topic: String::new(),
            scheduled_at: None,
            amount: Some(40.0),
            notes: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn any_status_string_is_accepted() {
        let input = UpdateBookingStatus {
            status: "rescheduled-by-phone".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
