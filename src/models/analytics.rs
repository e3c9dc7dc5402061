//! Read-side records consumed by the analytics aggregator, and the shapes it
//! produces.
//!
//! Every input field is optional. Records deserialized from loosely-typed JSON
//! never fail on a bad field: wrong types collapse to `None`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user as seen by the aggregator.
#[derive(Debug, Clone, Default, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A booking as seen by the aggregator.
#[derive(Debug, Clone, Default, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tutor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub topic: Option<String>,
}

/// A tutor profile as seen by the aggregator. `id` is the document id.
#[derive(Debug, Clone, Default, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TutorRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub display_name: Option<String>,
}

/// Signups on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Completed-booking revenue for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: f64,
}

/// Monthly revenue series plus the totals accumulated across all months.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub months: Vec<MonthlyAmount>,
    pub total_revenue: f64,
    pub completed_count: u64,
}

/// Fixed-rate split of revenue between platform and tutors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformStats {
    pub platform_fees: f64,
    pub tutor_payouts: f64,
    pub average_session_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTutor {
    pub tutor_id: String,
    pub name: String,
    pub sessions: u64,
    pub earnings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectCount {
    pub topic: String,
    pub count: u64,
}

/// Everything the admin analytics view renders.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub total_users: usize,
    pub total_bookings: usize,
    pub user_growth: Vec<DailyCount>,
    pub monthly_revenue: Vec<MonthlyAmount>,
    pub total_revenue: f64,
    pub completed_count: u64,
    pub platform_stats: PlatformStats,
    pub top_tutors: Vec<TopTutor>,
    pub top_subjects: Vec<SubjectCount>,
}

/// Forgiving field deserializers for schema-less records.
pub mod lenient {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Only JSON numbers count. Strings, even numeric ones, are `None`.
    pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
        .filter(|n| n.is_finite()))
    }

    /// Strings pass through; other JSON types are `None`.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    /// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates (midnight UTC) and
    /// epoch milliseconds. Anything else is `None`.
    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => parse_timestamp(&s),
            Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        })
    }

    fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn booking_record_from_loose_json() {
        let b: BookingRecord = serde_json::from_str(
            r#"{"status":"completed","amount":"abc","createdAt":"2024-01-05","tutorId":"t1","topic":7}"#,
        )
        .unwrap();
        assert_eq!(b.status.as_deref(), Some("completed"));
        assert_eq!(b.amount, None);
        assert_eq!(b.tutor_id.as_deref(), Some("t1"));
        assert_eq!(b.topic, None);
        let ts = b.created_at.unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 5));
    }

    #[test]
    fn booking_record_missing_fields() {
        let b: BookingRecord = serde_json::from_str("{}").unwrap();
        assert!(b.status.is_none());
        assert!(b.amount.is_none());
        assert!(b.created_at.is_none());
    }

    #[test]
    fn numeric_string_amount_is_none() {
        let b: BookingRecord = serde_json::from_str(r#"{"amount":" 42.5 "}"#).unwrap();
        assert_eq!(b.amount, None);
        let b: BookingRecord = serde_json::from_str(r#"{"amount":"100"}"#).unwrap();
        assert_eq!(b.amount, None);
    }

    #[test]
    fn null_and_bool_amounts_are_none() {
        let b: BookingRecord = serde_json::from_str(r#"{"amount":null}"#).unwrap();
        assert!(b.amount.is_none());
        let b: BookingRecord = serde_json::from_str(r#"{"amount":true}"#).unwrap();
        assert!(b.amount.is_none());
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_millis() {
        let u: UserRecord =
            serde_json::from_str(r#"{"createdAt":"2024-03-10T23:30:00-02:00"}"#).unwrap();
        assert_eq!(
            u.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 11, 1, 30, 0).unwrap())
        );
        let u: UserRecord = serde_json::from_str(r#"{"createdAt":1704067200000}"#).unwrap();
        assert_eq!(
            u.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_timestamp_is_none() {
        let u: UserRecord = serde_json::from_str(r#"{"createdAt":"yesterday"}"#).unwrap();
        assert!(u.created_at.is_none());
    }

    #[test]
    fn daily_count_serializes_iso_date() {
        let d = DailyCount {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            count: 3,
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["date"], "2024-01-05");
    }
}
