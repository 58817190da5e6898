use chrono::{DateTime, Datelike, Utc};

use crate::models::{MonthBucket, User, UserStatus};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Joiners per month of `now`'s year. The admin, employee and inactive
/// counts overlap: one user can contribute to all three.
pub fn user_engagement(users: &[User], now: DateTime<Utc>) -> Vec<MonthBucket> {
    let year = now.year();
    let mut buckets: Vec<MonthBucket> = MONTH_NAMES
        .iter()
        .map(|name| MonthBucket {
            name: name.to_string(),
            admins: 0,
            employees: 0,
            inactive: 0,
        })
        .collect();

    for user in users.iter().filter(|u| u.join_date.year() == year) {
        let bucket = &mut buckets[user.join_date.month0() as usize];
        if user.role.is_admin {
            bucket.admins += 1;
        }
        if user.role.is_employee {
            bucket.employees += 1;
        }
        if user.status == UserStatus::Inactive {
            bucket.inactive += 1;
        }
    }

    buckets
}
