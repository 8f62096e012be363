use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Booking, EntityKind};
use crate::services::export::booking_sheet;
use crate::services::listing::{filter_rows, visible_page};
use crate::services::transitions;
use crate::state::AppState;

use super::{check_auth, csv_response, ListQuery, PageResponse};

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.bookings(state.api.as_ref()).await;

    let mut selections = state.selections.lock().unwrap();
    let (search, page) = selections
        .bookings
        .apply(query.search.as_deref(), query.page);
    let view = visible_page(&rows, &search, page, state.config.page_size);
    // Clamping may have moved us off the requested page; remember where
    // we actually landed.
    selections.bookings.page = view.page;

    Ok(Json(PageResponse {
        rows: view.rows.iter().map(|&b| b.clone()).collect(),
        page: view.page,
        total_pages: view.total_pages,
        total: view.total,
    }))
}

// POST /api/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub status: String,
    pub remarks: Option<String>,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = state.cache.bookings(state.api.as_ref()).await;
    let current = bookings
        .iter()
        .find(|b| b.booking_id == id)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?
        .booking_status;

    let transition =
        transitions::validate_booking(id, current, &body.status, body.remarks.as_deref())?;

    let claim = state.dialogs.begin(EntityKind::Bookings, id)?;
    match state.api.update_booking_status(&transition).await {
        Ok(message) => {
            state.cache.invalidate(EntityKind::Bookings);
            claim.resolve(true);
            Ok(Json(serde_json::json!({"message": message})))
        }
        Err(e) => {
            claim.resolve(false);
            Err(e)
        }
    }
}

// GET /api/bookings/export.csv
pub async fn export_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.bookings(state.api.as_ref()).await;
    let search = match query.search {
        Some(s) => s,
        None => state.selections.lock().unwrap().bookings.search.clone(),
    };

    let filtered = filter_rows(&rows, &search);
    let bytes = booking_sheet(&filtered).to_csv()?;
    Ok(csv_response("Bookings.csv", bytes))
}
