//! equilibrar-server
//!
//! HTTP front end for the Equilibrar dashboard. Holds a single login
//! session, serves the rendered HTML for the mounted role view and exposes
//! read-only JSON endpoints over the roster, instruments and metrics.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Dashboard
        .route("/", get(routes::dashboard::index))
        .route(
            "/session",
            post(routes::dashboard::login).delete(routes::dashboard::logout),
        )
        .route("/actions", post(routes::dashboard::dispatch_action))
        // Read-only data
        .route("/users", get(routes::users::list_users))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route(
            "/clients/{id}/next-meeting",
            get(routes::clients::next_meeting),
        )
        .route(
            "/clients/{id}/audio/weekly",
            get(routes::clients::weekly_audio),
        )
        .route(
            "/metrics/audio/weekly",
            get(routes::metrics::weekly_audio_usage),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
