pub mod astrologers;
pub mod bookings;
pub mod call_requests;
pub mod dashboard;
pub mod health;

use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Query string for the list endpoints. Omitted fields leave the stored
/// selection untouched.
#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct PageResponse<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

pub fn csv_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                &format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
