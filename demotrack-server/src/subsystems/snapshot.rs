use std::time::Instant;

use chrono::{DateTime, Utc};
use demotrack_core::{AnalyticsSnapshot, Aggregator};
use demotrack_ingest::{resolve_sessions, resolve_users, Collection, IngestError, RawSession, RawUser};

/// Resolve posted collections and run the aggregator over them. `now`
/// overrides the aggregator's clock for reproducible reports.
pub fn build_snapshot(
    aggregator: &Aggregator,
    sessions: Collection<RawSession>,
    users: Collection<RawUser>,
    now: Option<DateTime<Utc>>,
) -> Result<AnalyticsSnapshot, IngestError> {
    let start = Instant::now();

    let sessions = resolve_sessions(sessions.into_items())?;
    let users = resolve_users(users.into_items())?;

    let snapshot = match now {
        Some(at) => aggregator.snapshot_at(&sessions, &users, at),
        None => aggregator.snapshot(&sessions, &users),
    };

    tracing::info!(
        "Snapshot built: {} sessions, {} users, {} activity entries in {}ms",
        sessions.len(),
        users.len(),
        snapshot.recent_activity.len(),
        start.elapsed().as_millis()
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use demotrack_core::{AnalyticsConfig, FixedClock};
    use std::sync::Arc;

    fn aggregator() -> Aggregator {
        let at = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        Aggregator::with_clock(AnalyticsConfig::default(), Arc::new(FixedClock(at)))
    }

    #[test]
    fn test_build_snapshot_from_envelopes() {
        let sessions: Collection<RawSession> = serde_json::from_value(serde_json::json!({
            "data": [{"id": 1, "date": "2024-06-10", "time": "10:00", "status": "completed", "rating": 5, "duration": 90}]
        }))
        .unwrap();
        let users: Collection<RawUser> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Dana", "role": "admin", "status": "active", "joinDate": "2024-03-01"}
        ]))
        .unwrap();

        let snapshot = build_snapshot(&aggregator(), sessions, users, None).unwrap();
        assert_eq!(snapshot.total_sessions, 1);
        assert_eq!(snapshot.active_users, 1);
        assert_eq!(snapshot.conversion_rate, 100.0);
        assert_eq!(snapshot.user_engagement[2].admins, 1);
    }

    #[test]
    fn test_now_override_beats_clock() {
        let at = Utc.with_ymd_and_hms(2030, 2, 2, 0, 0, 0).unwrap();
        let snapshot =
            build_snapshot(&aggregator(), Collection::default(), Collection::default(), Some(at))
                .unwrap();
        assert_eq!(snapshot.performance_trends[0].date, "2030-02-02");
    }

    #[test]
    fn test_bad_record_propagates() {
        let sessions: Collection<RawSession> = serde_json::from_value(serde_json::json!([
            {"id": "x", "date": "soon", "status": "upcoming"}
        ]))
        .unwrap();
        let err = build_snapshot(&aggregator(), sessions, Collection::default(), None).unwrap_err();
        assert!(matches!(err, IngestError::InvalidDate { .. }));
    }
}
