//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{archive, concerts, health, parolees};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Concert Hall API",
        version = "0.1.0",
        description = "Concert, parolee and concert archive REST resources",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Concerts
        concerts::list_concerts,
        concerts::get_concert,
        concerts::create_concert,
        concerts::update_concert,
        concerts::delete_all_concerts,
        // Parolees
        parolees::list_parolees,
        parolees::get_parolee,
        parolees::create_parolee,
        parolees::update_parolee,
        parolees::reload_parolees,
        parolees::create_movement,
        parolees::get_movements,
        parolees::update_disassociates,
        parolees::get_disassociates,
        parolees::update_criminal_profile,
        parolees::get_criminal_profile,
        // Archive
        archive::list_archived_concerts,
        archive::get_archived_concert,
        archive::save_archived_concert,
        archive::delete_archived_concert,
    ),
    components(
        schemas(
            // Concerts
            crate::models::concert::Concert,
            crate::models::concert::NewConcert,
            crate::models::concert::UpdateConcert,
            // Parolees
            crate::models::parolee::ParoleeDto,
            crate::models::parolee::Gender,
            crate::models::parolee::Address,
            crate::models::parolee::Curfew,
            crate::models::parolee::GeoPosition,
            crate::models::parolee::Movement,
            crate::models::parolee::Offence,
            crate::models::parolee::Conviction,
            crate::models::parolee::CriminalProfile,
            // Archive
            crate::models::archive::ArchivedConcert,
            crate::models::archive::Performer,
            crate::models::archive::Genre,
            // Health
            health::HealthResponse,
            health::ReadyResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "concerts", description = "In-memory concert store"),
        (name = "parolees", description = "In-memory parolee store"),
        (name = "archive", description = "Database-backed concert archive")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
