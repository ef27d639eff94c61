//! Display helpers shared by views.

use chrono::{DateTime, Utc};

/// Human-friendly age of a timestamp relative to `now`.
///
/// Anything older than thirty days falls back to the calendar date.
#[must_use]
pub fn format_relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(at);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if days > 30 {
        at.format("%Y-%m-%d").to_string()
    } else if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "just now".to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Compact counter: `999`, `1.2K`, `3.4万`, `1.5M`.
#[must_use]
pub fn format_count(value: u64) -> String {
    // Precision loss above 2^53 is irrelevant at one decimal.
    #[allow(clippy::cast_precision_loss)]
    let as_float = value as f64;
    if value < 1_000 {
        value.to_string()
    } else if value < 10_000 {
        format!("{:.1}K", as_float / 1_000.0)
    } else if value < 1_000_000 {
        format!("{:.1}万", as_float / 10_000.0)
    } else {
        format!("{:.1}M", as_float / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = fixed_now();
        assert_eq!(format_relative_time(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative_time(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(format_relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_relative_time(now - Duration::days(30), now), "30 days ago");
    }

    #[test]
    fn relative_time_falls_back_to_date() {
        let now = fixed_now();
        let at = now - Duration::days(31);
        assert_eq!(format_relative_time(at, now), "2023-10-14");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = fixed_now();
        assert_eq!(format_relative_time(now + Duration::hours(2), now), "just now");
    }

    #[test]
    fn count_units() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_240), "1.2K");
        assert_eq!(format_count(12_000), "1.2万");
        assert_eq!(format_count(2_500_000), "2.5M");
    }
}
