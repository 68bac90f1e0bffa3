//! Concert archive API endpoints (mounted only with a database)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::archive::ArchivedConcert,
    services::archive::ArchiveService,
    AppState,
};

use super::Payload;

fn archive(state: &AppState) -> AppResult<&ArchiveService> {
    state
        .services
        .archive
        .as_ref()
        .ok_or_else(|| AppError::Internal("Concert archive is not configured".to_string()))
}

/// List archived concerts ordered by date
#[utoipa::path(
    get,
    path = "/archive/concerts",
    tag = "archive",
    responses(
        (status = 200, description = "Archived concerts", body = Vec<ArchivedConcert>),
        (status = 500, description = "Persistence failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_archived_concerts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ArchivedConcert>>> {
    Ok(Json(archive(&state)?.list().await?))
}

/// Get archived concert by ID
#[utoipa::path(
    get,
    path = "/archive/concerts/{id}",
    tag = "archive",
    params(("id" = i64, Path, description = "Archived concert ID")),
    responses(
        (status = 200, description = "Archived concert with its performer", body = ArchivedConcert),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_archived_concert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ArchivedConcert>> {
    Ok(Json(archive(&state)?.get_by_id(id).await?))
}

/// Save an archived concert. Entities without an id are inserted, the
/// others updated.
#[utoipa::path(
    post,
    path = "/archive/concerts",
    tag = "archive",
    request_body = ArchivedConcert,
    responses(
        (status = 200, description = "Saved concert with assigned ids", body = ArchivedConcert),
        (status = 404, description = "Referenced concert or performer not found"),
        (status = 500, description = "Persistence failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_archived_concert(
    State(state): State<AppState>,
    Payload(concert): Payload<ArchivedConcert>,
) -> AppResult<Json<ArchivedConcert>> {
    Ok(Json(archive(&state)?.save(concert).await?))
}

/// Delete an archived concert
#[utoipa::path(
    delete,
    path = "/archive/concerts/{id}",
    tag = "archive",
    params(("id" = i64, Path, description = "Archived concert ID")),
    responses(
        (status = 204, description = "Archived concert deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_archived_concert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    archive(&state)?.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
