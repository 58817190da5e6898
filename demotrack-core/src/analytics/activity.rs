use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::analytics::window::TrendWindow;
use crate::models::{ActivityEntry, Session, SessionStatus, User};

const UNKNOWN_USER: &str = "Unknown User";

/// Activity feed for sessions whose effective timestamp lies inside the trend
/// window, newest first.
pub fn recent_activity(
    sessions: &[Session],
    users: &[User],
    window: &TrendWindow,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let names = user_names(users);

    let mut timed: Vec<(DateTime<Utc>, ActivityEntry)> = sessions
        .iter()
        .filter_map(|session| {
            let at = effective_timestamp(session);
            if !window.contains(at) {
                return None;
            }
            let entry = ActivityEntry {
                user: display_name(session.created_by.as_deref(), &names),
                action: action_label(&session.status, &session.technology),
                time: relative_time(at, now),
                status: session.status.clone(),
            };
            Some((at, entry))
        })
        .collect();

    // Stable, so equal timestamps keep input order.
    timed.sort_by(|a, b| b.0.cmp(&a.0));
    timed.into_iter().map(|(_, entry)| entry).collect()
}

/// `created_at` when recorded, otherwise the session date at its `HH:MM`
/// start time.
pub fn effective_timestamp(session: &Session) -> DateTime<Utc> {
    if let Some(created_at) = session.created_at {
        return created_at;
    }
    let (hours, minutes) = parse_clock(&session.time);
    let midnight = session.date.and_time(NaiveTime::MIN).and_utc();
    Duration::try_hours(hours)
        .zip(Duration::try_minutes(minutes))
        .and_then(|(h, m)| midnight.checked_add_signed(h)?.checked_add_signed(m))
        .unwrap_or(midnight)
}

/// Hours and minutes from `HH:MM`. A component that does not parse reads as
/// zero; out-of-range values are left to roll over.
pub fn parse_clock(time: &str) -> (i64, i64) {
    let mut parts = time.split(':');
    let mut component = || {
        parts
            .next()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(0)
    };
    let hours = component();
    let minutes = component();
    (hours, minutes)
}

fn user_names(users: &[User]) -> HashMap<&str, &str> {
    let mut names = HashMap::with_capacity(users.len());
    for user in users {
        names.entry(user.id.as_str()).or_insert(user.name.as_str());
    }
    names
}

fn display_name(created_by: Option<&str>, names: &HashMap<&str, &str>) -> String {
    match created_by {
        Some(id) if !id.is_empty() => names.get(id).copied().unwrap_or(id).to_string(),
        _ => UNKNOWN_USER.to_string(),
    }
}

pub fn action_label(status: &SessionStatus, technology: &str) -> String {
    match status {
        SessionStatus::Upcoming => format!("Scheduled {} Demo", technology),
        SessionStatus::Completed => format!("Completed {} Demo", technology),
        SessionStatus::Cancelled => format!("Cancelled {} Demo", technology),
        SessionStatus::Other(raw) => format!("{} {} Demo", raw, technology),
    }
}

/// Coarse "time ago" text. Timestamps in the future read as "Just now".
///
/// Units stay plural for a count of one ("1 hours ago"); the dashboard feed
/// shows exactly this text.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} minutes ago", minutes);
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{} hours ago", hours);
    }
    format!("{} days ago", elapsed.num_days())
}
