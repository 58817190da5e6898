use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled product demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    /// Wall-clock start as `HH:MM`. Kept raw; the engine parses it leniently.
    pub time: String,
    pub status: SessionStatus,
    /// Minutes. `None` means unknown.
    pub duration: Option<u32>,
    /// 0–5. `None` means not yet rated.
    pub rating: Option<f64>,
    pub technology: String,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Session lifecycle state. Values the dashboard does not know about are kept
/// verbatim in `Other` so they can still be labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    Upcoming,
    Completed,
    Cancelled,
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Upcoming => "upcoming",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Other(s) => s,
        }
    }

    /// Upcoming and completed sessions both count as active demand.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Upcoming | SessionStatus::Completed)
    }
}

impl From<String> for SessionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "upcoming" => SessionStatus::Upcoming,
            "completed" => SessionStatus::Completed,
            "cancelled" => SessionStatus::Cancelled,
            _ => SessionStatus::Other(s),
        }
    }
}

impl From<&str> for SessionStatus {
    fn from(s: &str) -> Self {
        SessionStatus::from(s.to_string())
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
