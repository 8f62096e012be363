use serde_json::json;

use crate::errors::{AppError, FieldErrors};
use crate::models::BookingStatus;

// UI action labels and the statuses the API actually stores for them.
pub const UI_CALL_COMPLETED: &str = "call completed";
pub const UI_CALL_CANCELLED: &str = "cancelled";
pub const API_CALL_APPROVE: &str = "call approve";
pub const API_CALL_CANCEL: &str = "call request can cancel";

pub const INVALID_BOOKING_DATA: &str = "Invalid data provided.";
pub const INVALID_CALL_DATA: &str = "Invalid data provided. Please fill all fields.";

/// A validated booking status change, ready to send upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingTransition {
    pub id: i64,
    pub status: BookingStatus,
    pub remarks: String,
}

impl BookingTransition {
    pub fn payload(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "booking_status": self.status.as_str(),
            "remarks": self.remarks,
        })
    }
}

/// A validated call-request status change. `api_status` is the mapped
/// backend status, not the label the admin clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTransition {
    pub id: i64,
    pub api_status: &'static str,
    pub remark: String,
}

impl CallTransition {
    pub fn payload(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "status": self.api_status,
            "remark": self.remark,
        })
    }
}

/// Validate an approve/reject request against the booking's current
/// status. Remarks are optional and default to an empty string.
pub fn validate_booking(
    id: i64,
    current: BookingStatus,
    requested: &str,
    remarks: Option<&str>,
) -> Result<BookingTransition, AppError> {
    let status = match requested {
        "accepted" => BookingStatus::Accepted,
        "cancelled" => BookingStatus::Cancelled,
        _ => {
            let mut errors = FieldErrors::new();
            errors.add("status", "Status must be accepted or cancelled.");
            return Err(AppError::validation(INVALID_BOOKING_DATA, errors));
        }
    };

    if current != BookingStatus::Pending {
        return Err(AppError::InvalidTransition(format!(
            "booking {id} is already {} and can no longer change",
            current.as_str()
        )));
    }

    Ok(BookingTransition {
        id,
        status,
        remarks: remarks.unwrap_or("").to_string(),
    })
}

/// Validate a call-request decision. Only a pending request may change,
/// the remark is mandatory, and the UI label is translated to the
/// status string the backend expects.
pub fn validate_call_request(
    id: i64,
    current_status: &str,
    requested: &str,
    remark: &str,
) -> Result<CallTransition, AppError> {
    let mut errors = FieldErrors::new();
    if remark.is_empty() {
        errors.add("remark", "Remark is required.");
    }

    let api_status = match requested {
        UI_CALL_COMPLETED => API_CALL_APPROVE,
        UI_CALL_CANCELLED => API_CALL_CANCEL,
        _ => {
            errors.add("status", "Status must be call completed or cancelled.");
            return Err(AppError::validation(INVALID_CALL_DATA, errors));
        }
    };

    if !errors.is_empty() {
        return Err(AppError::validation(INVALID_CALL_DATA, errors));
    }

    if !current_status.eq_ignore_ascii_case("call pending") {
        return Err(AppError::InvalidTransition(format!(
            "call request {id} is already {current_status} and can no longer change"
        )));
    }

    Ok(CallTransition {
        id,
        api_status,
        remark: remark.to_string(),
    })
}
