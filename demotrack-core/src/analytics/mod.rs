//! Analytics aggregation engine
//!
//! Turns the dashboard's session and user collections into one
//! `AnalyticsSnapshot`:
//!
//!   totalSessions      = |sessions|
//!   activeUsers        = |users with status active|
//!   averageSessionTime = round(Σ duration_or_60 / totalSessions), "1h 30m" style
//!   conversionRate     = round1(|rating >= 4| / totalSessions × 100)
//!   performanceTrends  = 7 day buckets over the trend window
//!   userEngagement     = 12 month buckets over now's calendar year
//!   recentActivity     = sessions inside the trend window, newest first
//!
//! The trend window starts on the earliest session date in the dataset (today
//! when there are none) and spans seven days. Every call recomputes from the
//! inputs; "now" comes from the caller's `Clock`.

pub mod activity;
pub mod conversion;
pub mod duration;
pub mod engagement;
pub mod trends;
pub mod window;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::config::AnalyticsConfig;
use crate::models::{AnalyticsSnapshot, Session, User, UserStatus};

pub use window::{resolve_window, TrendWindow, TREND_WINDOW_DAYS};

/// Snapshot with default analytics settings at an explicit instant.
pub fn compute_snapshot(
    sessions: &[Session],
    users: &[User],
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    Aggregator::new(AnalyticsConfig::default()).snapshot_at(sessions, users, now)
}

#[derive(Clone)]
pub struct Aggregator {
    config: AnalyticsConfig,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AnalyticsConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn snapshot(&self, sessions: &[Session], users: &[User]) -> AnalyticsSnapshot {
        self.snapshot_at(sessions, users, self.clock.now())
    }

    pub fn snapshot_at(
        &self,
        sessions: &[Session],
        users: &[User],
        now: DateTime<Utc>,
    ) -> AnalyticsSnapshot {
        let window = resolve_window(sessions, now);

        let snapshot = AnalyticsSnapshot {
            total_sessions: sessions.len(),
            active_users: users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            average_session_time: duration::average_session_time(
                sessions,
                self.config.default_duration_minutes,
            ),
            conversion_rate: conversion::conversion_rate(sessions, self.config.success_rating),
            performance_trends: trends::performance_trends(sessions, &window),
            user_engagement: engagement::user_engagement(users, now),
            recent_activity: activity::recent_activity(sessions, users, &window, now),
        };

        tracing::debug!(
            "Snapshot computed: {} sessions, {} users, {} activity entries, conversion {}%",
            snapshot.total_sessions,
            users.len(),
            snapshot.recent_activity.len(),
            snapshot.conversion_rate
        );

        snapshot
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
