use crate::analytics::window::TrendWindow;
use crate::models::{DayBucket, Session, SessionStatus};

/// One bucket per window day. Sessions dated outside the window, or carrying
/// a status that is neither active nor cancelled, land in no bucket.
pub fn performance_trends(sessions: &[Session], window: &TrendWindow) -> Vec<DayBucket> {
    window
        .days()
        .map(|day| {
            let mut bucket = DayBucket {
                name: day.format("%a").to_string(),
                date: day.format("%Y-%m-%d").to_string(),
                active_sessions: 0,
                cancelled_sessions: 0,
            };

            for session in sessions.iter().filter(|s| s.date == day) {
                if session.status.is_active() {
                    bucket.active_sessions += 1;
                } else if session.status == SessionStatus::Cancelled {
                    bucket.cancelled_sessions += 1;
                }
            }

            bucket
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(date: &str, status: &str) -> Session {
        Session {
            id: format!("{}-{}", date, status),
            date: date.parse().unwrap(),
            time: "09:00".to_string(),
            status: SessionStatus::from(status),
            duration: None,
            rating: None,
            technology: "Kafka".to_string(),
            created_by: None,
            created_at: None,
        }
    }

    fn window() -> TrendWindow {
        TrendWindow::starting_on(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    #[test]
    fn test_always_seven_buckets() {
        let trends = performance_trends(&[], &window());
        assert_eq!(trends.len(), 7);
        assert!(trends
            .iter()
            .all(|b| b.active_sessions == 0 && b.cancelled_sessions == 0));
    }

    #[test]
    fn test_weekday_names_follow_calendar_date() {
        let trends = performance_trends(&[], &window());
        let names: Vec<&str> = trends.iter().map(|b| b.name.as_str()).collect();
        // 2024-06-10 was a Monday.
        assert_eq!(names, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(trends[0].date, "2024-06-10");
        assert_eq!(trends[6].date, "2024-06-16");
    }

    #[test]
    fn test_counts_active_and_cancelled_per_day() {
        let sessions = vec![
            session("2024-06-10", "upcoming"),
            session("2024-06-10", "completed"),
            session("2024-06-10", "cancelled"),
            session("2024-06-12", "cancelled"),
        ];
        let trends = performance_trends(&sessions, &window());
        assert_eq!(trends[0].active_sessions, 2);
        assert_eq!(trends[0].cancelled_sessions, 1);
        assert_eq!(trends[1].active_sessions, 0);
        assert_eq!(trends[2].cancelled_sessions, 1);
    }

    #[test]
    fn test_sessions_outside_window_are_excluded() {
        let sessions = vec![
            session("2024-06-09", "completed"),
            session("2024-06-17", "completed"),
            session("2024-06-16", "completed"),
        ];
        let trends = performance_trends(&sessions, &window());
        let total: usize = trends.iter().map(|b| b.active_sessions).sum();
        assert_eq!(total, 1);
        assert_eq!(trends[6].active_sessions, 1);
    }

    #[test]
    fn test_unknown_status_counts_nowhere() {
        let sessions = vec![session("2024-06-11", "rescheduled")];
        let trends = performance_trends(&sessions, &window());
        assert_eq!(trends[1].active_sessions, 0);
        assert_eq!(trends[1].cancelled_sessions, 0);
    }
}
