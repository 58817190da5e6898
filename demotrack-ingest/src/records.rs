use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use demotrack_core::{RoleFlags, Session, SessionStatus, TrendWindow, User, UserStatus};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Record ids arrive as strings from some endpoints and numbers from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Session as served by the sessions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    pub id: RawId,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub status: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub created_by: Option<RawId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// User as served by the users endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub status: String,
    pub join_date: String,
}

pub fn resolve_session(raw: RawSession) -> Result<Session, IngestError> {
    let id = raw.id.to_string();
    // Dates too late for a full trend window are rejected like unparseable ones.
    let date = parse_calendar_date(&raw.date)
        .filter(|d| TrendWindow::fits(*d))
        .ok_or_else(|| IngestError::InvalidDate {
            field: "date",
            id: id.clone(),
            value: raw.date.clone(),
        })?;

    let created_at = raw.created_at.as_deref().and_then(|value| {
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            tracing::warn!(
                "Session {}: ignoring unparseable createdAt {:?}, falling back to date + time",
                id,
                value
            );
        }
        parsed
    });

    Ok(Session {
        id,
        date,
        time: raw.time.unwrap_or_default(),
        status: SessionStatus::from(raw.status),
        duration: raw.duration,
        rating: raw.rating,
        technology: raw.technology.unwrap_or_default(),
        created_by: raw.created_by.map(|c| c.to_string()),
        created_at,
    })
}

pub fn resolve_user(raw: RawUser) -> Result<User, IngestError> {
    let id = raw.id.to_string();
    let join_date = parse_calendar_date(&raw.join_date).ok_or_else(|| IngestError::InvalidDate {
        field: "joinDate",
        id: id.clone(),
        value: raw.join_date.clone(),
    })?;

    Ok(User {
        id,
        name: raw.name,
        role: RoleFlags::from_role(raw.role.as_deref().unwrap_or_default()),
        status: UserStatus::from(raw.status),
        join_date,
    })
}

pub fn resolve_sessions(raw: Vec<RawSession>) -> Result<Vec<Session>, IngestError> {
    raw.into_iter().map(resolve_session).collect()
}

pub fn resolve_users(raw: Vec<RawUser>) -> Result<Vec<User>, IngestError> {
    raw.into_iter().map(resolve_user).collect()
}

/// Calendar date from `YYYY-MM-DD`, or the UTC date of a full timestamp.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    parse_timestamp(value).map(|at| at.date_naive())
}

/// RFC 3339, or a zone-less ISO timestamp read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}
