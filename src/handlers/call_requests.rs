use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{CallRequest, EntityKind};
use crate::services::export::call_request_sheet;
use crate::services::listing::{filter_rows, visible_page};
use crate::services::transitions;
use crate::state::AppState;

use super::{check_auth, csv_response, ListQuery, PageResponse};

// GET /api/call-requests
pub async fn list_call_requests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<CallRequest>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.call_requests(state.api.as_ref()).await;

    let mut selections = state.selections.lock().unwrap();
    let (search, page) = selections
        .call_requests
        .apply(query.search.as_deref(), query.page);
    let view = visible_page(&rows, &search, page, state.config.page_size);
    selections.call_requests.page = view.page;

    Ok(Json(PageResponse {
        rows: view.rows.iter().map(|&r| r.clone()).collect(),
        page: view.page,
        total_pages: view.total_pages,
        total: view.total,
    }))
}

// POST /api/call-requests/:id/status
#[derive(Deserialize)]
pub struct UpdateCallRequest {
    pub status: String,
    #[serde(default)]
    pub remark: String,
}

pub async fn update_call_request_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCallRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let requests = state.cache.call_requests(state.api.as_ref()).await;
    let current = requests
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("call request {id}")))?
        .status
        .clone();

    let transition = transitions::validate_call_request(id, &current, &body.status, &body.remark)?;

    let claim = state.dialogs.begin(EntityKind::CallRequests, id)?;
    match state.api.update_call_request_status(&transition).await {
        Ok(message) => {
            state.cache.invalidate(EntityKind::CallRequests);
            claim.resolve(true);
            Ok(Json(serde_json::json!({"message": message})))
        }
        Err(e) => {
            claim.resolve(false);
            Err(e)
        }
    }
}

// GET /api/call-requests/export.csv
pub async fn export_call_requests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.call_requests(state.api.as_ref()).await;
    let search = match query.search {
        Some(s) => s,
        None => state
            .selections
            .lock()
            .unwrap()
            .call_requests
            .search
            .clone(),
    };

    let filtered = filter_rows(&rows, &search);
    let bytes = call_request_sheet(&filtered).to_csv()?;
    Ok(csv_response("CallRequests.csv", bytes))
}
