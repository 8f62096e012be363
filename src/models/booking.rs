use serde::{Deserialize, Serialize};

use super::Searchable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: i64,
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub session_book_date: String,
    #[serde(default)]
    pub session_book_time: String,
    #[serde(default)]
    pub booking_datetime: String,
    #[serde(default)]
    pub astrologer_id: i64,
    #[serde(default)]
    pub astrologer_name: String,
    #[serde(default)]
    pub astrologer_email: String,
    #[serde(default)]
    pub expertise_id: i64,
    // The API omits the field entirely for rows nobody has acted on.
    #[serde(default)]
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Searchable for Booking {
    fn searchable_fields(&self) -> [&str; 3] {
        [&self.client_name, &self.client_email, &self.astrologer_name]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Accepted,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Wire shape of `get_booking.php`.
#[derive(Debug, Deserialize)]
pub struct BookingEnvelope {
    #[serde(default)]
    pub bookings: Vec<Booking>,
}
