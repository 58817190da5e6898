use crate::models::Session;

/// Percentage of *all* sessions (rated or not, cancelled or not) that were
/// rated at or above `success_rating`, rounded to one decimal.
pub fn conversion_rate(sessions: &[Session], success_rating: f64) -> f64 {
    let total = sessions.len();
    if total == 0 {
        return 0.0;
    }

    let successful = sessions
        .iter()
        .filter_map(|s| s.rating)
        .filter(|&r| r > 0.0 && r >= success_rating)
        .count();

    round_one_decimal(successful as f64 / total as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
