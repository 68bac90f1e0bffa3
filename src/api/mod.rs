//! HTTP handlers and router for the concert hall REST endpoints

pub mod archive;
pub mod concerts;
pub mod health;
pub mod openapi;
pub mod parolees;

use axum::{
    extract::{FromRequest, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{error::AppError, AppState};

/// JSON request body whose rejections (missing, null or malformed body)
/// surface as `400 Bad Request`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct Payload<T>(pub T);

/// `start`/`size` window over entity ids
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// First id to include (default 1)
    pub start: Option<i64>,
    /// Number of ids to scan (default 1)
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn window(&self) -> (i64, i64) {
        (self.start.unwrap_or(1), self.size.unwrap_or(1))
    }
}

/// Issue a fresh client id cookie to any request that arrives without one.
/// Status and body are left untouched.
pub async fn client_cookie(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let name = &state.config.session.cookie_name;
    let known = jar.get(name).is_some();

    let response = next.run(request).await;
    if known {
        return response;
    }

    let client_id = Uuid::new_v4().to_string();
    tracing::info!("Generated cookie: {}", client_id);
    let cookie = Cookie::build((name.clone(), client_id)).path("/");
    (jar.add(cookie), response).into_response()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut resources = Router::new()
        // Concerts
        .route(
            "/concerts",
            get(concerts::list_concerts)
                .post(concerts::create_concert)
                .delete(concerts::delete_all_concerts),
        )
        .route(
            "/concerts/:id",
            get(concerts::get_concert).put(concerts::update_concert),
        )
        // Parolees
        .route(
            "/parolees",
            get(parolees::list_parolees)
                .post(parolees::create_parolee)
                .put(parolees::reload_parolees),
        )
        .route(
            "/parolees/:id",
            get(parolees::get_parolee).put(parolees::update_parolee),
        )
        .route(
            "/parolees/:id/movements",
            get(parolees::get_movements).post(parolees::create_movement),
        )
        .route(
            "/parolees/:id/disassociates",
            get(parolees::get_disassociates).put(parolees::update_disassociates),
        )
        .route(
            "/parolees/:id/criminal-profile",
            get(parolees::get_criminal_profile).put(parolees::update_criminal_profile),
        );

    if state.services.archive.is_some() {
        resources = resources
            .route(
                "/archive/concerts",
                get(archive::list_archived_concerts).post(archive::save_archived_concert),
            )
            .route(
                "/archive/concerts/:id",
                get(archive::get_archived_concert).delete(archive::delete_archived_concert),
            );
    }

    let probes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state.clone());

    let resources = resources
        .layer(middleware::from_fn_with_state(state.clone(), client_cookie))
        .with_state(state);

    probes
        .merge(resources)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
