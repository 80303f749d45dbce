use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::handler::{self, AppState};

/// Build the axum router with every fleet endpoint.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(
            "/vehicles",
            get(handler::list_vehicles).post(handler::create_vehicle),
        )
        .route("/vehicles/batch", post(handler::create_vehicles))
        .route(
            "/vehicles/brand/:brand/between/:start_year/:end_year",
            get(handler::by_brand_and_years),
        )
        .route(
            "/vehicles/average_speed/brand/:brand",
            get(handler::average_speed),
        )
        .route(
            "/vehicles/average_capacity/brand/:brand",
            get(handler::average_capacity),
        )
        .route("/vehicles/fuel_type/:fuel_type", get(handler::by_fuel_type))
        .route(
            "/vehicles/transmission/:transmission",
            get(handler::by_transmission),
        )
        .route("/vehicles/dimensions", get(handler::by_dimensions))
        .route("/vehicles/weight", get(handler::by_weight))
        .route("/vehicles/:id", delete(handler::delete_vehicle))
        .route("/vehicles/:id/update_speed", put(handler::update_speed))
        .route("/vehicles/:id/update_fuel", put(handler::update_fuel))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
