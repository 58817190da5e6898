use crate::models::Session;

/// Mean session length, with `default_minutes` standing in for sessions that
/// never recorded one.
pub fn average_session_time(sessions: &[Session], default_minutes: u32) -> String {
    if sessions.is_empty() {
        return "0m".to_string();
    }

    let total: u64 = sessions
        .iter()
        .map(|s| u64::from(s.duration.unwrap_or(default_minutes)))
        .sum();
    let average = (total as f64 / sessions.len() as f64).round() as u64;

    format_minutes(average)
}

/// `"45m"` under an hour, `"1h 30m"` / `"2h 0m"` otherwise.
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}
