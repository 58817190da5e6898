use serde::{Deserialize, Serialize};

use crate::error::DemotrackError;
use crate::models::SessionStatus;

/// One complete aggregation result. Keys are camelCase because the snapshot
/// is handed straight to the dashboard's chart components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_sessions: usize,
    pub active_users: usize,
    pub average_session_time: String,
    pub conversion_rate: f64,
    pub performance_trends: Vec<DayBucket>,
    pub user_engagement: Vec<MonthBucket>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl AnalyticsSnapshot {
    pub fn to_json(&self, pretty: bool) -> Result<String, DemotrackError> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    /// Weekday abbreviation, e.g. "Mon".
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub active_sessions: usize,
    pub cancelled_sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month abbreviation, e.g. "Mar".
    pub name: String,
    pub admins: usize,
    pub employees: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user: String,
    pub action: String,
    pub time: String,
    pub status: SessionStatus,
}
