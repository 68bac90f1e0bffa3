//! Concert API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::concert::{Concert, NewConcert, UpdateConcert},
};

use super::{PageQuery, Payload};

/// List concerts whose ids fall in `[start, start + size)`
#[utoipa::path(
    get,
    path = "/concerts",
    tag = "concerts",
    params(PageQuery),
    responses(
        (status = 200, description = "Concerts in the id window, possibly none", body = Vec<Concert>)
    )
)]
pub async fn list_concerts(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Vec<Concert>> {
    let (start, size) = query.window();
    Json(state.services.concerts.list(start, size))
}

/// Get concert by ID
#[utoipa::path(
    get,
    path = "/concerts/{id}",
    tag = "concerts",
    params(("id" = i64, Path, description = "Concert ID")),
    responses(
        (status = 200, description = "Concert details", body = Concert),
        (status = 404, description = "Concert not found")
    )
)]
pub async fn get_concert(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Concert>> {
    let concert = state.services.concerts.get_by_id(id)?;
    Ok(Json(concert))
}

/// Create a concert
#[utoipa::path(
    post,
    path = "/concerts",
    tag = "concerts",
    request_body = NewConcert,
    responses(
        (status = 201, description = "Concert created", body = Concert,
            headers(("Location" = String, description = "Path of the new concert"))),
        (status = 400, description = "Missing or invalid body", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_concert(
    State(state): State<crate::AppState>,
    Payload(data): Payload<NewConcert>,
) -> AppResult<impl IntoResponse> {
    let concert = state.services.concerts.create(data)?;
    let location = format!("/concerts/{}", concert.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(concert)))
}

/// Update a concert
#[utoipa::path(
    put,
    path = "/concerts/{id}",
    tag = "concerts",
    params(("id" = i64, Path, description = "Concert ID")),
    request_body = UpdateConcert,
    responses(
        (status = 204, description = "Concert updated"),
        (status = 404, description = "Concert not found")
    )
)]
pub async fn update_concert(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Payload(data): Payload<UpdateConcert>,
) -> AppResult<StatusCode> {
    state.services.concerts.update(id, data)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every concert and restart ids
#[utoipa::path(
    delete,
    path = "/concerts",
    tag = "concerts",
    responses(
        (status = 204, description = "All concerts deleted")
    )
)]
pub async fn delete_all_concerts(State(state): State<crate::AppState>) -> StatusCode {
    state.services.concerts.clear();
    StatusCode::NO_CONTENT
}
