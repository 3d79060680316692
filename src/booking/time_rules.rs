//! Temporal business rules
//!
//! Expiry windows, the night-time push delay and duration formatting.

use chrono::{DateTime, Duration, Timelike, Utc};

/// Hour (inclusive) after which pushes count as night-time.
const NIGHT_START_HOUR: u32 = 22;
/// Hour (exclusive) until which pushes count as night-time.
const NIGHT_END_HOUR: u32 = 6;
/// Delayed pushes go out at this hour.
const BUSINESS_START_HOUR: u32 = 9;

/// When an unaccepted booking stops being offered.
///
/// Short-notice bookings expire quickly after creation; far-future ones are
/// pulled 48 hours before the session.
pub fn will_expire_at(due: DateTime<Utc>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    let gap = due - created_at;

    if gap <= Duration::hours(24) {
        created_at + Duration::minutes(90)
    } else if gap <= Duration::hours(72) {
        created_at + Duration::hours(16)
    } else if gap <= Duration::hours(90) {
        due
    } else {
        due - Duration::hours(48)
    }
}

/// Night window: 22:00-06:00.
pub fn is_night_time(now: DateTime<Utc>) -> bool {
    let hour = now.hour();
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Next 09:00 at or after `now`; delayed night pushes are released then.
pub fn next_business_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let today_start = now
        .date_naive()
        .and_hms_opt(BUSINESS_START_HOUR, 0, 0)
        .expect("valid wall-clock time")
        .and_utc();

    if now < today_start {
        today_start
    } else {
        today_start + Duration::days(1)
    }
}

/// Customer cancellations 24h or more ahead of the session are free.
pub fn is_before_24h_cutoff(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    due - now >= Duration::hours(24)
}

/// Render minutes as SMS-friendly text: `45 -> "45min"`, `60 -> "1h"`,
/// `90 -> "01h 30min"`.
pub fn format_duration_minutes(minutes: i32) -> String {
    if minutes < 60 {
        return format!("{minutes}min");
    }
    if minutes == 60 {
        return "1h".to_string();
    }
    format!("{:02}h {:02}min", minutes / 60, minutes % 60)
}

/// Render a session length as `"Hh Mmin"`, used in the session-ended
/// notices.
pub fn format_session_secs(secs: i64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{hours}h {minutes}min")
}

/// Parse a submitted `"HH:MM:SS"` or `"HH:MM"` session interval to seconds.
pub fn parse_session_interval(s: &str) -> Option<i64> {
    let parts: Vec<&str> = s.split(':').collect();
    let (h, m, sec) = match parts.as_slice() {
        [h, m] => (h, m, "0"),
        [h, m, sec] => (h, m, *sec),
        _ => return None,
    };
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    let sec: i64 = sec.parse().ok()?;
    if h < 0 || !(0..60).contains(&m) || !(0..60).contains(&sec) {
        return None;
    }
    Some(h * 3600 + m * 60 + sec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_will_expire_at_windows() {
        let created = at(2026, 8, 1, 12, 0);

        // Within a day: 90 minutes to accept
        let due = created + Duration::hours(10);
        assert_eq!(will_expire_at(due, created), created + Duration::minutes(90));

        // One to three days out: 16 hours
        let due = created + Duration::hours(48);
        assert_eq!(will_expire_at(due, created), created + Duration::hours(16));

        // Up to 90 hours out: open until the session itself
        let due = created + Duration::hours(80);
        assert_eq!(will_expire_at(due, created), due);

        // Far future: pulled 48 hours before the session
        let due = created + Duration::hours(200);
        assert_eq!(will_expire_at(due, created), due - Duration::hours(48));
    }

    #[test]
    fn test_night_window() {
        assert!(is_night_time(at(2026, 8, 1, 23, 30)));
        assert!(is_night_time(at(2026, 8, 1, 22, 0)));
        assert!(is_night_time(at(2026, 8, 1, 3, 0)));
        assert!(!is_night_time(at(2026, 8, 1, 6, 0)));
        assert!(!is_night_time(at(2026, 8, 1, 12, 0)));
        assert!(!is_night_time(at(2026, 8, 1, 21, 59)));
    }

    #[test]
    fn test_next_business_time() {
        // Early morning: same day 09:00
        let now = at(2026, 8, 1, 3, 0);
        assert_eq!(next_business_time(now), at(2026, 8, 1, 9, 0));

        // Late evening: next day 09:00
        let now = at(2026, 8, 1, 23, 0);
        assert_eq!(next_business_time(now), at(2026, 8, 2, 9, 0));

        // Exactly at 09:00 rolls forward
        let now = at(2026, 8, 1, 9, 0);
        assert_eq!(next_business_time(now), at(2026, 8, 2, 9, 0));
    }

    #[test]
    fn test_24h_cutoff() {
        let due = at(2026, 8, 2, 12, 0);
        assert!(is_before_24h_cutoff(due, at(2026, 8, 1, 12, 0)));
        assert!(!is_before_24h_cutoff(due, at(2026, 8, 1, 12, 1)));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_minutes(45), "45min");
        assert_eq!(format_duration_minutes(60), "1h");
        assert_eq!(format_duration_minutes(90), "01h 30min");
        assert_eq!(format_duration_minutes(150), "02h 30min");
    }

    #[test]
    fn test_parse_session_interval() {
        assert_eq!(parse_session_interval("01:30:00"), Some(5400));
        assert_eq!(parse_session_interval("01:30"), Some(5400));
        assert_eq!(parse_session_interval("00:00:45"), Some(45));
        assert_eq!(parse_session_interval(""), None);
        assert_eq!(parse_session_interval("1:75"), None);
        assert_eq!(parse_session_interval("abc"), None);
    }

    #[test]
    fn test_format_session_secs() {
        assert_eq!(format_session_secs(5400), "1h 30min");
        assert_eq!(format_session_secs(360), "0h 6min");
    }
}
