use crate::models::{parse_api_datetime, Astrologer, Booking, CallRequest};

/// A flat projection of a filtered list, ready for any tabular renderer.
/// CSV is what we serve; the type stays public so other artifact formats
/// can reuse the same projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    pub fn to_csv(&self) -> anyhow::Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        Ok(writer.into_inner()?)
    }
}

/// "Jun 15, 2025, 2:00:00 PM" style timestamps for humans; timestamps
/// the API mangled pass through untouched.
fn display_datetime(raw: &str) -> String {
    match parse_api_datetime(raw) {
        Some(ts) => ts.format("%b %-d, %Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

pub fn booking_sheet(bookings: &[&Booking]) -> ExportSheet {
    ExportSheet {
        title: "Bookings".to_string(),
        headers: [
            "Client Name",
            "Client Email",
            "Astrologer",
            "Session",
            "Status",
            "Booked On",
        ]
        .map(String::from)
        .to_vec(),
        rows: bookings
            .iter()
            .map(|b| {
                vec![
                    b.client_name.clone(),
                    b.client_email.clone(),
                    b.astrologer_name.clone(),
                    format!("{} at {}", b.session_book_date, b.session_book_time),
                    b.booking_status.as_str().to_string(),
                    display_datetime(&b.booking_datetime),
                ]
            })
            .collect(),
    }
}

pub fn call_request_sheet(requests: &[&CallRequest]) -> ExportSheet {
    ExportSheet {
        title: "Call Requests".to_string(),
        headers: [
            "Client Name",
            "Phone",
            "Note",
            "Status",
            "Remark",
            "Request Date",
        ]
        .map(String::from)
        .to_vec(),
        rows: requests
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.phone.clone(),
                    r.note.clone(),
                    r.status.clone(),
                    if r.remark.is_empty() {
                        "N/A".to_string()
                    } else {
                        r.remark.clone()
                    },
                    display_datetime(&r.call_request_date),
                ]
            })
            .collect(),
    }
}

pub fn astrologer_sheet(astrologers: &[&Astrologer]) -> ExportSheet {
    ExportSheet {
        title: "Astrologers".to_string(),
        headers: [
            "Name",
            "Email",
            "Expertise",
            "Experience",
            "Language",
            "Location",
            "Registered",
        ]
        .map(String::from)
        .to_vec(),
        rows: astrologers
            .iter()
            .map(|a| {
                vec![
                    a.name.clone(),
                    a.email.clone(),
                    a.expertise.clone(),
                    a.experience.clone(),
                    a.language.clone(),
                    a.location.clone(),
                    a.register_date.clone(),
                ]
            })
            .collect(),
    }
}
