use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::digest;
use crate::services::stats::{self, DashboardStats};
use crate::state::AppState;

use super::check_auth;

// GET /api/dashboard
#[derive(Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_bookings: Vec<Booking>,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let astrologers = state.cache.astrologers(state.api.as_ref()).await;
    let bookings = state.cache.bookings(state.api.as_ref()).await;

    let stats = stats::dashboard_stats(&astrologers, &bookings, Utc::now().date_naive());
    let recent_bookings = stats::latest_bookings(&bookings, 5)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DashboardResponse {
        stats,
        recent_bookings,
    }))
}

#[derive(Serialize)]
pub struct NotificationItem {
    pub booking_id: i64,
    pub client_name: String,
    pub astrologer_name: String,
    pub booking_datetime: String,
}

#[derive(Serialize)]
pub struct NotificationsResponse {
    pub unseen_count: usize,
    pub notifications: Vec<NotificationItem>,
}

fn digest_response(state: &AppState, bookings: &[Booking]) -> NotificationsResponse {
    let recent = digest::recent_bookings(bookings, Utc::now().naive_utc());
    let unseen_count = digest::unseen_count(&recent, state.watermark.last_seen());
    let notifications = recent
        .iter()
        .map(|b| NotificationItem {
            booking_id: b.booking_id,
            client_name: b.client_name.clone(),
            astrologer_name: b.astrologer_name.clone(),
            booking_datetime: b.booking_datetime.clone(),
        })
        .collect();

    NotificationsResponse {
        unseen_count,
        notifications,
    }
}

// GET /api/notifications
//
// Peek only: polling the badge must not mark anything as seen.
pub async fn notifications(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<NotificationsResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = state.cache.bookings(state.api.as_ref()).await;
    Ok(Json(digest_response(&state, &bookings)))
}

// POST /api/notifications/seen
pub async fn mark_notifications_seen(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<NotificationsResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = state.cache.bookings(state.api.as_ref()).await;
    let recent = digest::recent_bookings(&bookings, Utc::now().naive_utc());
    if let Some(newest) = digest::newest_timestamp(&recent) {
        state.watermark.advance(newest);
    }

    Ok(Json(digest_response(&state, &bookings)))
}
