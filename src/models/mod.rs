pub mod astrologer;
pub mod booking;
pub mod call_request;
pub mod expertise;

use chrono::NaiveDateTime;

pub use astrologer::{Astrologer, AstrologerEnvelope};
pub use booking::{Booking, BookingEnvelope, BookingStatus};
pub use call_request::{CallRequest, CallRequestEnvelope};
pub use expertise::Expertise;

/// Text fields a list row exposes to the search box.
pub trait Searchable {
    fn searchable_fields(&self) -> [&str; 3];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Astrologers,
    Bookings,
    CallRequests,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Astrologers => "astrologers",
            EntityKind::Bookings => "bookings",
            EntityKind::CallRequests => "call_requests",
        }
    }
}

/// Parse a timestamp as the booking API sends it. The upstream is not
/// consistent about the separator or sub-second precision, so try the
/// shapes seen in practice before giving up.
pub fn parse_api_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let trimmed = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
}
