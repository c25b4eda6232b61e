//! Display formatting helpers.
//!
//! Playback runtimes report NaN durations before media metadata has loaded;
//! every formatter here must yield a safe default instead of propagating NaN
//! into displayed text.

use chrono::{DateTime, Utc};

/// Format a position/duration in seconds as `m:ss` (or `h:mm:ss` past an
/// hour).  NaN, infinite, and negative inputs all render as `0:00`.
pub fn format_timestamp(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let total = secs as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Compact view-count display: 999 → "999", 120_000 → "120K", 1_500_000 → "1.5M".
pub fn format_views(views: u64) -> String {
    const K: u64 = 1_000;
    const M: u64 = 1_000_000;
    const B: u64 = 1_000_000_000;
    match views {
        v if v >= B => format_scaled(v, B, "B"),
        v if v >= M => format_scaled(v, M, "M"),
        v if v >= K => format_scaled(v, K, "K"),
        v => v.to_string(),
    }
}

fn format_scaled(value: u64, unit: u64, suffix: &str) -> String {
    let whole = value / unit;
    let tenth = (value % unit) * 10 / unit;
    if whole >= 10 || tenth == 0 {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, tenth, suffix)
    }
}

/// Coarse relative age, "2 days ago" style.  Timestamps in the future (clock
/// skew in mock data) render as "just now".
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let (count, unit) = if secs < 3_600 {
        (secs / 60, "min")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else if secs < 604_800 {
        (secs / 86_400, "day")
    } else if secs < 2_592_000 {
        (secs / 604_800, "week")
    } else if secs < 31_536_000 {
        (secs / 2_592_000, "month")
    } else {
        (secs / 31_536_000, "year")
    };
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_timestamp_basic() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.7), "1:05");
        assert_eq!(format_timestamp(605.0), "10:05");
        assert_eq!(format_timestamp(3725.0), "1:02:05");
    }

    #[test]
    fn test_format_timestamp_is_nan_safe() {
        assert_eq!(format_timestamp(f64::NAN), "0:00");
        assert_eq!(format_timestamp(f64::INFINITY), "0:00");
        assert_eq!(format_timestamp(-3.0), "0:00");
    }

    #[test]
    fn test_format_views() {
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(120_000), "120K");
        assert_eq!(format_views(1_500_000), "1.5M");
        assert_eq!(format_views(2_000_000), "2M");
        assert_eq!(format_views(2_100_000_000), "2.1B");
    }

    #[test]
    fn test_relative_age() {
        let now = Utc::now();
        assert_eq!(relative_age(now - Duration::seconds(30), now), "just now");
        assert_eq!(relative_age(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_age(now - Duration::days(2), now), "2 days ago");
        assert_eq!(relative_age(now - Duration::days(8), now), "1 week ago");
        // Future timestamps clamp to "just now" rather than underflowing.
        assert_eq!(relative_age(now + Duration::hours(1), now), "just now");
    }
}
