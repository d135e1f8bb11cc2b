//! Registration, login, and logout handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{NewUser, SessionUser},
    session::Session,
    state::AppState,
    validation,
};

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Response for successful registration
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    pub message: String,
}

/// Registration page; logged-in users are sent home
pub async fn register_page(Extension(session): Extension<Session>) -> Response {
    if session.data.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    Json(json!({ "errors": [] })).into_response()
}

/// User registration endpoint
///
/// Validation violations accumulate into one ordered error list. Success
/// inserts the user but does not log them in.
pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Response> {
    if session.data.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let username = payload.username.trim();
    let email = payload.email.trim();

    let errors =
        validation::validate_registration(username, email, &payload.password, &payload.confirm_password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.email_exists(email).await? {
        return Err(AppError::Validation(vec![
            "Email is already registered.".to_string(),
        ]));
    }

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: payload.password,
    };
    let user = state.users.create(&new_user).await?;
    info!("Registered new user: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. You can now login.".to_string(),
        }),
    )
        .into_response())
}

/// Login page; logged-in users are sent home
pub async fn login_page(Extension(session): Extension<Session>) -> Response {
    if session.data.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    Json(json!({ "errors": [] })).into_response()
}

/// User login endpoint
///
/// Unknown email and wrong password both answer with the same message so
/// nothing leaks about which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    if session.data.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let email = payload.email.trim();

    let errors = validation::validate_login(email, &payload.password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let Some(user) = state.users.find_by_email(email).await? else {
        return Err(AppError::InvalidCredentials);
    };
    if !state.users.verify_password(&user, &payload.password)? {
        return Err(AppError::InvalidCredentials);
    }

    session.data.user = Some(SessionUser {
        username: user.username.clone(),
        email: user.email.clone(),
    });
    state.sessions.save(&session).await?;
    info!("User logged in: {}", user.email);

    Ok(Json(LoginResponse {
        username: user.username,
        email: user.email,
        message: "Login successful.".to_string(),
    })
    .into_response())
}

/// Logout endpoint; drops the user from the session and returns home
pub async fn logout(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
) -> AppResult<Redirect> {
    session.data.user = None;
    state.sessions.save(&session).await?;
    Ok(Redirect::to("/"))
}
