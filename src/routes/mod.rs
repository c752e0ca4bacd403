// src/routes/mod.rs
pub mod chat;
pub mod health;

use std::time::Duration;

use crate::{config::AllowedOrigins, error::AppError, state::SharedState};
use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    routing::{get, post},
};
use chat::chat_handler;
use health::health_handler;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(origins: &AllowedOrigins) -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
}

/// Browsers only get an `Access-Control-Allow-Origin` header back for
/// origins on the allow-list.
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let origins = origins.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &request::Parts| {
                origin.to_str().is_ok_and(|o| origins.is_allowed(o))
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
