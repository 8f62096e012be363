use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{parse_api_datetime, Astrologer, Booking};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_astrologers: usize,
    pub new_this_month: usize,
    /// Mean of the astrologers' experience in years, one decimal place.
    pub average_experience: String,
    pub todays_bookings: usize,
    pub monthly_bookings: usize,
}

/// Leading-integer parse of the free-form experience field. "12 years"
/// counts as 12, anything without a leading number counts as zero.
fn experience_years(raw: &str) -> i64 {
    raw.trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

pub fn dashboard_stats(
    astrologers: &[Astrologer],
    bookings: &[Booking],
    today: NaiveDate,
) -> DashboardStats {
    let today_str = today.format("%Y-%m-%d").to_string();
    let month_str = today.format("%Y-%m").to_string();

    let total_astrologers = astrologers.len();
    let new_this_month = astrologers
        .iter()
        .filter(|a| a.register_date.starts_with(&month_str))
        .count();

    let average_experience = if total_astrologers > 0 {
        let sum: i64 = astrologers.iter().map(|a| experience_years(&a.experience)).sum();
        format!("{:.1}", sum as f64 / total_astrologers as f64)
    } else {
        "0.0".to_string()
    };

    let todays_bookings = bookings
        .iter()
        .filter(|b| b.session_book_date == today_str)
        .count();
    let monthly_bookings = bookings
        .iter()
        .filter(|b| b.session_book_date.starts_with(&month_str))
        .count();

    DashboardStats {
        total_astrologers,
        new_this_month,
        average_experience,
        todays_bookings,
        monthly_bookings,
    }
}

/// The most recently created bookings, newest first.
pub fn latest_bookings(bookings: &[Booking], count: usize) -> Vec<&Booking> {
    let mut with_ts: Vec<(&Booking, NaiveDateTime)> = bookings
        .iter()
        .filter_map(|b| parse_api_datetime(&b.booking_datetime).map(|ts| (b, ts)))
        .collect();
    with_ts.sort_by(|a, b| b.1.cmp(&a.1));
    with_ts.truncate(count);
    with_ts.into_iter().map(|(b, _)| b).collect()
}
