pub mod http;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{Astrologer, Booking, CallRequest, Expertise};
use crate::services::profile::AstrologerForm;
use crate::services::transitions::{BookingTransition, CallTransition};

pub use http::AstrobartaClient;

// Success messages surfaced to the admin.
pub const BOOKING_UPDATED: &str = "Booking status updated successfully.";
pub const CALL_REQUEST_UPDATED: &str = "Call request status updated successfully.";

// The exact acknowledgement the call-request endpoint answers with.
const CALL_UPDATE_ACK: &str = "Call request updated successfully";

// Generic operation failures when the request never produced a usable body.
pub const BOOKING_UPDATE_FAILED: &str = "Failed to update booking status.";
pub const CALL_UPDATE_FAILED: &str = "Failed to update call request status.";
pub const REGISTER_FAILED: &str = "Failed to Create Astrologer.";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to Update Astrologer.";

/// The remote booking platform. List fetches never fail loudly: on any
/// trouble they log and yield an empty collection, and the dashboard
/// renders what it has. Mutations report exactly what went wrong and are
/// never retried.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_astrologers(&self) -> Vec<Astrologer>;
    async fn fetch_expertise(&self) -> Vec<Expertise>;
    async fn fetch_bookings(&self) -> Vec<Booking>;
    async fn fetch_call_requests(&self) -> Vec<CallRequest>;

    async fn update_booking_status(
        &self,
        transition: &BookingTransition,
    ) -> Result<String, AppError>;
    async fn update_call_request_status(
        &self,
        transition: &CallTransition,
    ) -> Result<String, AppError>;
    async fn register_astrologer(
        &self,
        form: &AstrologerForm,
        register_date: NaiveDate,
    ) -> Result<(), AppError>;
    async fn update_astrologer(&self, id: i64, form: &AstrologerForm) -> Result<(), AppError>;
}

fn non_empty_str(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn joined_errors(body: &Value) -> Option<String> {
    let list = body.get("errors")?.as_array()?;
    if list.is_empty() {
        return None;
    }
    Some(
        list.iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// The booking endpoint signals success with `"status": "success"` in the
/// body and ignores the HTTP status line entirely.
pub fn classify_booking_update(body: &Value) -> Result<String, AppError> {
    if body.get("status").and_then(Value::as_str) == Some("success") {
        return Ok(BOOKING_UPDATED.to_string());
    }
    let message = non_empty_str(body, "message")
        .or_else(|| non_empty_str(body, "error"))
        .unwrap_or_else(|| "Failed to update booking.".to_string());
    Err(AppError::Api(message))
}

/// The call-request endpoint has no status field; success is the literal
/// acknowledgement message, anything else is a failure.
pub fn classify_call_update(body: &Value) -> Result<String, AppError> {
    let ack = body.get("message").and_then(Value::as_str);
    if ack == Some(CALL_UPDATE_ACK) {
        return Ok(CALL_REQUEST_UPDATED.to_string());
    }
    let message = non_empty_str(body, "message")
        .or_else(|| non_empty_str(body, "error"))
        .or_else(|| joined_errors(body))
        .unwrap_or_else(|| "Failed to update call request.".to_string());
    Err(AppError::Api(message))
}

/// Profile submissions are judged by the HTTP status; the body only
/// refines the failure message.
pub fn classify_profile_submit(status: StatusCode, body: &Value) -> Result<(), AppError> {
    if status.is_success() {
        return Ok(());
    }
    let message = non_empty_str(body, "error")
        .or_else(|| joined_errors(body))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(AppError::Api(message))
}
