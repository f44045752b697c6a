//! Vacancy model matching the frontend Vacancy interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An advertised staff vacancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub department: String,
    pub employment_type: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// RFC 3339 timestamp; absent means applications never close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,
    pub is_published: bool,
    pub is_urgent: bool,
    /// Derived from `closing_date` at read time, not stored
    #[serde(default)]
    pub is_open: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Vacancy {
    /// Whether a vacancy with this closing date is still accepting applications at `now`.
    ///
    /// Unparseable dates count as open rather than silently hiding the posting.
    pub fn closing_date_open(closing_date: Option<&str>, now: DateTime<Utc>) -> bool {
        match closing_date {
            None => true,
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(closing) => closing.with_timezone(&Utc) > now,
                Err(_) => true,
            },
        }
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        Self::closing_date_open(self.closing_date.as_deref(), now)
    }
}

/// Request body for creating a new vacancy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacancyRequest {
    pub title: String,
    pub department: String,
    pub employment_type: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub closing_date: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_urgent: bool,
}

/// Request body for updating an existing vacancy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVacancyRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default)]
    pub qualifications: Option<Vec<String>>,
    #[serde(default)]
    pub closing_date: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub is_urgent: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_no_closing_date_is_always_open() {
        assert!(Vacancy::closing_date_open(None, now()));
    }

    #[test]
    fn test_future_closing_date_is_open() {
        assert!(Vacancy::closing_date_open(
            Some("2025-12-31T23:59:59Z"),
            now()
        ));
    }

    #[test]
    fn test_past_closing_date_is_closed() {
        assert!(!Vacancy::closing_date_open(
            Some("2025-01-31T23:59:59Z"),
            now()
        ));
    }

    #[test]
    fn test_closing_exactly_now_is_closed() {
        assert!(!Vacancy::closing_date_open(
            Some("2025-06-15T12:00:00Z"),
            now()
        ));
    }

    #[test]
    fn test_offset_closing_date() {
        // 2025-06-15T14:00:00+04:00 is 10:00 UTC, already past
        assert!(!Vacancy::closing_date_open(
            Some("2025-06-15T14:00:00+04:00"),
            now()
        ));
    }

    #[test]
    fn test_unparseable_closing_date_is_open() {
        assert!(Vacancy::closing_date_open(Some("next term"), now()));
    }
}
