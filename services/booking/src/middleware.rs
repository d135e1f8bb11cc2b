//! Per-request session loading and the login gate

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::error;

use crate::{
    session::{SESSION_COOKIE, Session},
    state::AppState,
};

/// Load the visitor's session from Redis (or mint a fresh anonymous one)
/// and hand it to downstream handlers through request extensions. A fresh
/// session gets its id set as an HttpOnly cookie on the way out.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let cookie_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let (session, is_new) = match state.sessions.open(cookie_id).await {
        Ok(opened) => opened,
        Err(e) => {
            error!("Failed to open session: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let session_id = session.id.clone();
    req.extensions_mut().insert(session);

    let mut response = next.run(req).await;

    if is_new {
        let cookie = Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true)
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => error!("Failed to encode session cookie: {}", e),
        }
    }

    Ok(response)
}

/// Gate for the booking, checkout, and payment routes: anonymous visitors
/// are redirected to the login page.
pub async fn require_user(req: Request<Body>, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<Session>()
        .map(|s| s.data.is_authenticated())
        .unwrap_or(false);

    if authenticated {
        next.run(req).await
    } else {
        Redirect::to("/login").into_response()
    }
}
