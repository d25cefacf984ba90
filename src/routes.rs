use axum::{
    routing::{get, post},
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::panic_response;
use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::service_info).fallback(handlers::not_found))
        .route("/health", get(handlers::health_check).fallback(handlers::not_found))

        // Translation API
        .route(
            "/api/translate",
            post(handlers::translate).fallback(handlers::not_found),
        )
        .route(
            "/api/translate-with-example",
            post(handlers::translate_with_example).fallback(handlers::not_found),
        )
        .route(
            "/api/languages",
            get(handlers::languages).fallback(handlers::not_found),
        )
        .route(
            "/api/translate/languages",
            get(handlers::live_languages).fallback(handlers::not_found),
        )

        // Unknown paths; wrong methods on known paths are handled per route
        .fallback(handlers::not_found)
}

/// Full application: routes, middleware and state.
pub fn build_app(state: AppState) -> Router {
    let environment = state.config.server.environment;

    create_routes()
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, environment),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
