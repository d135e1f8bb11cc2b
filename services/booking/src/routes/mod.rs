//! Booking service routes

pub mod auth;
pub mod booking;
pub mod chat;

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    middleware::{require_user, session_middleware},
    state::AppState,
};

/// Create the router for the booking service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/book", get(booking::book_page).post(booking::submit_booking))
        .route(
            "/checkout",
            get(booking::checkout_page).post(booking::checkout_action),
        )
        .route(
            "/payment_gateway",
            get(booking::payment_gateway_page).post(booking::capture_payment),
        )
        .route("/payment", get(booking::payment_confirmation))
        .route_layer(middleware::from_fn(require_user));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/chatbot", post(chat::chatbot))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}

/// Landing route; flow redirects (logout, checkout removal) point here
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "service": "palmstay",
        "message": "Welcome to Palmstay"
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool).await;
    let status = if database { "ok" } else { "degraded" };
    Json(json!({
        "status": status,
        "service": "booking-service",
        "database": database
    }))
}
