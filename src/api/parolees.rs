//! Parolee API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::parolee::{CriminalProfile, Movement, ParoleeDto},
};

use super::{PageQuery, Payload};

/// `Link` headers for the neighbouring windows of a parolee listing
fn page_links(path: &str, start: i64, size: i64, total: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let mut link = |start: i64, rel: &str| {
        let value = format!("<{}?start={}&size={}>; rel=\"{}\"", path, start, size, rel);
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.append(header::LINK, value);
        }
    };

    if size > 0 && start > 1 {
        link(start.saturating_sub(size).max(1), "prev");
    }
    if size > 0 && start.saturating_add(size) <= total as i64 {
        link(start.saturating_add(size), "next");
    }
    headers
}

/// List parolees whose ids fall in `[start, start + size)`
#[utoipa::path(
    get,
    path = "/parolees",
    tag = "parolees",
    params(PageQuery),
    responses(
        (status = 200, description = "Parolees in the id window, with prev/next Link headers",
            body = Vec<ParoleeDto>)
    )
)]
pub async fn list_parolees(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> impl IntoResponse {
    let (start, size) = query.window();
    let (parolees, total) = state.services.parolees.list(start, size);
    (page_links(uri.path(), start, size, total), Json(parolees))
}

/// Get parolee by ID
#[utoipa::path(
    get,
    path = "/parolees/{id}",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    responses(
        (status = 200, description = "Parolee details", body = ParoleeDto),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn get_parolee(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ParoleeDto>> {
    Ok(Json(state.services.parolees.get_by_id(id)?))
}

/// Create a parolee
#[utoipa::path(
    post,
    path = "/parolees",
    tag = "parolees",
    request_body = ParoleeDto,
    responses(
        (status = 201, description = "Parolee created", body = ParoleeDto,
            headers(("Location" = String, description = "Path of the new parolee"))),
        (status = 400, description = "Missing or invalid body", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_parolee(
    State(state): State<crate::AppState>,
    Payload(data): Payload<ParoleeDto>,
) -> AppResult<impl IntoResponse> {
    let parolee = state.services.parolees.create(data)?;
    let location = format!("/parolees/{}", parolee.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(parolee)))
}

/// Update a parolee's personal details
#[utoipa::path(
    put,
    path = "/parolees/{id}",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    request_body = ParoleeDto,
    responses(
        (status = 204, description = "Parolee updated"),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn update_parolee(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Payload(data): Payload<ParoleeDto>,
) -> AppResult<StatusCode> {
    state.services.parolees.update(id, data)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reset the parolee store to its seed data
#[utoipa::path(
    put,
    path = "/parolees",
    tag = "parolees",
    responses(
        (status = 204, description = "Seed data reloaded")
    )
)]
pub async fn reload_parolees(State(state): State<crate::AppState>) -> StatusCode {
    state.services.parolees.reload();
    StatusCode::NO_CONTENT
}

/// Record a movement for a parolee
#[utoipa::path(
    post,
    path = "/parolees/{id}/movements",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    request_body = Movement,
    responses(
        (status = 204, description = "Movement recorded"),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn create_movement(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Payload(movement): Payload<Movement>,
) -> AppResult<StatusCode> {
    state.services.parolees.add_movement(id, movement)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Movement history, newest first
#[utoipa::path(
    get,
    path = "/parolees/{id}/movements",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    responses(
        (status = 200, description = "Movements", body = Vec<Movement>),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn get_movements(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Movement>>> {
    Ok(Json(state.services.parolees.movements(id)?))
}

/// Replace a parolee's disassociates with the given parolee ids
#[utoipa::path(
    put,
    path = "/parolees/{id}/disassociates",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    request_body = Vec<i64>,
    responses(
        (status = 204, description = "Disassociates updated"),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn update_disassociates(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Payload(ids): Payload<Vec<i64>>,
) -> AppResult<StatusCode> {
    state.services.parolees.update_disassociates(id, ids)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/parolees/{id}/disassociates",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    responses(
        (status = 200, description = "Disassociated parolees", body = Vec<ParoleeDto>),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn get_disassociates(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ParoleeDto>>> {
    Ok(Json(state.services.parolees.disassociates(id)?))
}

#[utoipa::path(
    put,
    path = "/parolees/{id}/criminal-profile",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    request_body = CriminalProfile,
    responses(
        (status = 204, description = "Criminal profile updated"),
        (status = 404, description = "Parolee not found")
    )
)]
pub async fn update_criminal_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Payload(profile): Payload<CriminalProfile>,
) -> AppResult<StatusCode> {
    state.services.parolees.update_criminal_profile(id, profile)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/parolees/{id}/criminal-profile",
    tag = "parolees",
    params(("id" = i64, Path, description = "Parolee ID")),
    responses(
        (status = 200, description = "Criminal profile", body = CriminalProfile),
        (status = 404, description = "Parolee or profile not found")
    )
)]
pub async fn get_criminal_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CriminalProfile>> {
    Ok(Json(state.services.parolees.criminal_profile(id)?))
}
