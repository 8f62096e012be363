use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use crate::errors::{AppError, FieldErrors};
use crate::models::{Astrologer, EntityKind, Expertise};
use crate::services::export::astrologer_sheet;
use crate::services::listing::{filter_rows, visible_page};
use crate::services::profile::{self, AstrologerForm, ProfileImage};
use crate::state::AppState;

use super::{check_auth, csv_response, ListQuery, PageResponse};

// GET /api/astrologers
pub async fn list_astrologers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<Astrologer>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.astrologers(state.api.as_ref()).await;

    let mut selections = state.selections.lock().unwrap();
    let (search, page) = selections
        .astrologers
        .apply(query.search.as_deref(), query.page);
    let view = visible_page(&rows, &search, page, state.config.page_size);
    selections.astrologers.page = view.page;

    Ok(Json(PageResponse {
        rows: view.rows.iter().map(|&a| a.clone()).collect(),
        page: view.page,
        total_pages: view.total_pages,
        total: view.total,
    }))
}

// GET /api/expertise
pub async fn list_expertise(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Expertise>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.expertise(state.api.as_ref()).await;
    Ok(Json(rows.to_vec()))
}

fn bad_form(e: axum::extract::multipart::MultipartError) -> AppError {
    tracing::error!(error = %e, "failed to read astrologer form");
    AppError::validation("Invalid form data.", FieldErrors::new())
}

/// Collect the multipart fields into a form. Unknown fields are ignored;
/// an image part with an empty body counts as "no image picked".
async fn read_astrologer_form(mut multipart: Multipart) -> Result<AstrologerForm, AppError> {
    let mut form = AstrologerForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => form.name = field.text().await.map_err(bad_form)?,
            "email" => form.email = field.text().await.map_err(bad_form)?,
            "expertise_id" => {
                form.expertise_id = field
                    .text()
                    .await
                    .map_err(bad_form)?
                    .trim()
                    .parse()
                    .unwrap_or(0);
            }
            "bio" => form.bio = field.text().await.map_err(bad_form)?,
            "experience" => form.experience = Some(field.text().await.map_err(bad_form)?),
            "language" => form.language = Some(field.text().await.map_err(bad_form)?),
            "location" => form.location = Some(field.text().await.map_err(bad_form)?),
            "profile_image" => {
                let filename = field.file_name().unwrap_or("profile").to_string();
                let bytes = field.bytes().await.map_err(bad_form)?;
                if !bytes.is_empty() {
                    form.profile_image = Some(ProfileImage {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

// POST /api/astrologers
pub async fn create_astrologer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let form = read_astrologer_form(multipart).await?;
    if let Err(errors) = profile::validate(&form) {
        return Err(AppError::validation(profile::CREATE_FAILED, errors));
    }

    state
        .api
        .register_astrologer(&form, Utc::now().date_naive())
        .await?;
    state.cache.invalidate(EntityKind::Astrologers);

    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/astrologers/:id
pub async fn update_astrologer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let form = read_astrologer_form(multipart).await?;
    if let Err(errors) = profile::validate(&form) {
        return Err(AppError::validation(profile::UPDATE_FAILED, errors));
    }

    let astrologers = state.cache.astrologers(state.api.as_ref()).await;
    if !astrologers.iter().any(|a| a.id == id) {
        return Err(AppError::NotFound(format!("astrologer {id}")));
    }

    state.api.update_astrologer(id, &form).await?;
    state.cache.invalidate(EntityKind::Astrologers);

    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/astrologers/export.csv
pub async fn export_astrologers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let rows = state.cache.astrologers(state.api.as_ref()).await;
    let search = match query.search {
        Some(s) => s,
        None => state.selections.lock().unwrap().astrologers.search.clone(),
    };

    let filtered = filter_rows(&rows, &search);
    let bytes = astrologer_sheet(&filtered).to_csv()?;
    Ok(csv_response("Astrologers.csv", bytes))
}
