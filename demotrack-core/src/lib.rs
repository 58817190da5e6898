pub mod analytics;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;

pub use analytics::{compute_snapshot, Aggregator, TrendWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AnalyticsConfig, DemotrackConfig};
pub use error::DemotrackError;
pub use models::{
    ActivityEntry, AnalyticsSnapshot, DayBucket, MonthBucket, RoleFlags, Session, SessionStatus,
    User, UserStatus,
};
