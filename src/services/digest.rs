use chrono::{Duration, NaiveDateTime};

use crate::models::{parse_api_datetime, Booking};

/// Bookings created within the last 24 hours, newest first. Rows whose
/// creation timestamp the API mangled are left out; timestamps slightly
/// in the future (clock skew upstream) still count.
pub fn recent_bookings(bookings: &[Booking], now: NaiveDateTime) -> Vec<&Booking> {
    let mut recent: Vec<(&Booking, NaiveDateTime)> = bookings
        .iter()
        .filter_map(|b| parse_api_datetime(&b.booking_datetime).map(|ts| (b, ts)))
        .filter(|(_, ts)| now.signed_duration_since(*ts) <= Duration::hours(24))
        .collect();
    recent.sort_by(|a, b| b.1.cmp(&a.1));
    recent.into_iter().map(|(b, _)| b).collect()
}

/// How many of the digest candidates are strictly newer than the
/// watermark. No watermark yet means everything is unseen.
pub fn unseen_count(recent: &[&Booking], last_seen: Option<NaiveDateTime>) -> usize {
    recent
        .iter()
        .filter_map(|b| parse_api_datetime(&b.booking_datetime))
        .filter(|ts| match last_seen {
            Some(seen) => *ts > seen,
            None => true,
        })
        .count()
}

/// Creation timestamp of the newest candidate, the value the watermark
/// advances to when the admin opens the digest.
pub fn newest_timestamp(recent: &[&Booking]) -> Option<NaiveDateTime> {
    recent
        .first()
        .and_then(|b| parse_api_datetime(&b.booking_datetime))
}
