use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::Session;

pub const TREND_WINDOW_DAYS: i64 = 7;

/// The seven consecutive days shared by the trend series and the activity
/// feed. `start` is midnight of the first day, `end` the last millisecond of
/// the seventh; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TrendWindow {
    /// Window opening on `first_day`. A day too close to the end of the
    /// calendar is pulled back to the last day a full window still fits on.
    pub fn starting_on(first_day: NaiveDate) -> Self {
        let first_day = first_day.min(latest_first_day());
        let start = first_day.and_time(NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_signed(Duration::days(TREND_WINDOW_DAYS) - Duration::milliseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    /// Whether a full window can open on `first_day` without clamping.
    pub fn fits(first_day: NaiveDate) -> bool {
        first_day <= latest_first_day()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..TREND_WINDOW_DAYS as u64)
            .map(move |offset| first.checked_add_days(Days::new(offset)).unwrap_or(NaiveDate::MAX))
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

fn latest_first_day() -> NaiveDate {
    NaiveDate::MAX
        .checked_sub_days(Days::new(TREND_WINDOW_DAYS as u64 - 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Anchor the window on the earliest session date in the dataset, or on
/// today when there are no sessions at all.
pub fn resolve_window(sessions: &[Session], now: DateTime<Utc>) -> TrendWindow {
    let first_day = sessions
        .iter()
        .map(|s| s.date)
        .min()
        .unwrap_or_else(|| now.date_naive());

    let window = TrendWindow::starting_on(first_day);
    tracing::debug!(
        "Trend window resolved: {} .. {} ({} sessions)",
        window.start,
        window.end,
        sessions.len()
    );
    window
}
