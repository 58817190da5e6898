pub mod session;
pub mod snapshot;
pub mod user;

pub use session::{Session, SessionStatus};
pub use snapshot::{ActivityEntry, AnalyticsSnapshot, DayBucket, MonthBucket};
pub use user::{RoleFlags, User, UserStatus};
