//! End-to-end flow tests for the booking service
//!
//! These drive the real handlers against live Postgres and Redis, so they
//! are ignored by default; run them with `cargo test -- --ignored` against
//! a configured environment.

use axum::{Extension, Json, extract::State, http::StatusCode};
use uuid::Uuid;

use booking::{
    chat::{ChatClient, ChatConfig},
    error::AppError,
    models::{BookingDraft, SessionUser},
    repositories::{BookingRepository, UserRepository},
    routes::{
        auth::{self, LoginRequest, RegisterRequest},
        booking as booking_routes,
    },
    session::{Session, SessionStore},
    state::AppState,
};
use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, init_pool},
};

async fn test_state() -> anyhow::Result<AppState> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let redis_pool = RedisPool::new(&RedisConfig::from_env()).await?;
    let chat = ChatClient::new(&ChatConfig {
        api_url: None,
        timeout_seconds: 1,
    })?;

    Ok(AppState {
        db_pool: pool.clone(),
        sessions: SessionStore::new(redis_pool),
        users: UserRepository::new(pool.clone()),
        bookings: BookingRepository::new(pool),
        chat,
    })
}

fn sample_draft(email: &str) -> BookingDraft {
    BookingDraft {
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        phone: "5550001111".to_string(),
        address: "12 Analytical Way".to_string(),
        location: "Lagoon View".to_string(),
        guests: "3".to_string(),
        arrivals: "2025-07-01".to_string(),
        departure: "2025-07-05".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires running Postgres and Redis"]
async fn test_register_then_login_round_trip() -> anyhow::Result<()> {
    let state = test_state().await?;
    let email = format!("guest-{}@example.com", Uuid::new_v4());

    let response = auth::register(
        State(state.clone()),
        Extension(Session::fresh()),
        Json(RegisterRequest {
            username: "guest".to_string(),
            email: email.clone(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        }),
    )
    .await
    .expect("registration with an unused email should succeed");
    assert_eq!(response.status(), StatusCode::CREATED);

    // The same credentials log in and land a user record in the session.
    let session = Session::fresh();
    let response = auth::login(
        State(state.clone()),
        Extension(session.clone()),
        Json(LoginRequest {
            email: email.clone(),
            password: "secret".to_string(),
        }),
    )
    .await
    .expect("login with the registered credentials should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let data = state
        .sessions
        .load(&session.id)
        .await?
        .expect("session should be persisted after login");
    assert_eq!(data.user.map(|u| u.email), Some(email.clone()));

    // A wrong password answers with the uniform credentials error.
    let err = auth::login(
        State(state.clone()),
        Extension(Session::fresh()),
        Json(LoginRequest {
            email,
            password: "not-the-password".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    Ok(())
}

#[tokio::test]
#[ignore = "requires running Postgres and Redis"]
async fn test_duplicate_email_is_rejected_without_insert() -> anyhow::Result<()> {
    let state = test_state().await?;
    let email = format!("guest-{}@example.com", Uuid::new_v4());

    let request = || RegisterRequest {
        username: "guest".to_string(),
        email: email.clone(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
    };

    auth::register(State(state.clone()), Extension(Session::fresh()), Json(request()))
        .await
        .expect("first registration should succeed");

    let err = auth::register(State(state.clone()), Extension(Session::fresh()), Json(request()))
        .await
        .unwrap_err();
    match err {
        AppError::Validation(errors) => {
            assert_eq!(errors, vec!["Email is already registered."]);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.db_pool)
        .await?;
    assert_eq!(count, 1, "duplicate registration must not insert a row");

    Ok(())
}

#[tokio::test]
#[ignore = "requires running Postgres and Redis"]
async fn test_payment_capture_writes_one_booking_and_one_payment() -> anyhow::Result<()> {
    let state = test_state().await?;
    let email = format!("guest-{}@example.com", Uuid::new_v4());

    let mut session = Session::fresh();
    session.data.user = Some(SessionUser {
        username: "guest".to_string(),
        email: email.clone(),
    });
    session.data.booking_draft = Some(sample_draft(&email));
    state.sessions.save(&session).await?;

    let response = booking_routes::capture_payment(
        State(state.clone()),
        Extension(session.clone()),
        Json(booking_routes::PaymentForm {
            card_number: "4111111111111111".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            name_on_card: "Ada Lovelace".to_string(),
        }),
    )
    .await
    .expect("capture with valid card details should succeed");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The session now carries the capture result and the draft is gone.
    let data = state
        .sessions
        .load(&session.id)
        .await?
        .expect("session should be persisted after capture");
    assert!(data.booking_draft.is_none());
    let booking_id = data.booking_id.expect("booking id should be stored");
    let booking_code = data.booking_code.expect("booking code should be stored");

    // Exactly one booking row and one payment row, sharing the code.
    let bookings: i64 = sqlx::query_scalar("SELECT count(*) FROM book_form WHERE id = $1")
        .bind(booking_id)
        .fetch_one(&state.db_pool)
        .await?;
    assert_eq!(bookings, 1);

    let payments: i64 = sqlx::query_scalar("SELECT count(*) FROM payments WHERE booking_code = $1")
        .bind(&booking_code)
        .fetch_one(&state.db_pool)
        .await?;
    assert_eq!(payments, 1);

    let payment = state
        .bookings
        .find_payment(&booking_code)
        .await?
        .expect("payment should be readable by its code");
    assert_eq!(payment.price, 30_000);

    let booking = state
        .bookings
        .find_booking(booking_id)
        .await?
        .expect("booking should be readable by its id");
    assert_eq!(booking.guests, "3");
    assert_eq!(booking.email, email);

    Ok(())
}

#[tokio::test]
#[ignore = "requires running Postgres and Redis"]
async fn test_invalid_card_number_performs_no_inserts() -> anyhow::Result<()> {
    let state = test_state().await?;
    let email = format!("guest-{}@example.com", Uuid::new_v4());
    let name_on_card = format!("Cardholder {}", Uuid::new_v4());

    let mut session = Session::fresh();
    session.data.user = Some(SessionUser {
        username: "guest".to_string(),
        email: email.clone(),
    });
    session.data.booking_draft = Some(sample_draft(&email));
    state.sessions.save(&session).await?;

    let err = booking_routes::capture_payment(
        State(state.clone()),
        Extension(session.clone()),
        Json(booking_routes::PaymentForm {
            card_number: "1234".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            name_on_card: name_on_card.clone(),
        }),
    )
    .await
    .unwrap_err();
    match err {
        AppError::Validation(errors) => {
            assert_eq!(errors, vec!["Please enter a valid 16-digit card number."]);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }

    let payments: i64 = sqlx::query_scalar("SELECT count(*) FROM payments WHERE name_on_card = $1")
        .bind(&name_on_card)
        .fetch_one(&state.db_pool)
        .await?;
    assert_eq!(payments, 0, "rejected capture must not insert a payment");

    // The draft survives the failed attempt and no capture was recorded.
    let data = state
        .sessions
        .load(&session.id)
        .await?
        .expect("session should still exist");
    assert!(data.booking_draft.is_some());
    assert!(data.booking_id.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "requires running Redis"]
async fn test_fresh_sessions_are_persisted_on_open() -> anyhow::Result<()> {
    let redis_pool = RedisPool::new(&RedisConfig::from_env()).await?;
    let sessions = SessionStore::new(redis_pool);

    // No cookie: a fresh session is minted and stored right away.
    let (session, is_new) = sessions.open(None).await?;
    assert!(is_new);
    assert!(sessions.load(&session.id).await?.is_some());

    // The handed-out id resolves to the same session on the next request.
    let (reopened, is_new) = sessions.open(Some(session.id.clone())).await?;
    assert!(!is_new);
    assert_eq!(reopened.id, session.id);

    // A stale id is replaced, and the replacement is persisted too.
    let (replacement, is_new) = sessions
        .open(Some(format!("gone-{}", Uuid::new_v4())))
        .await?;
    assert!(is_new);
    assert_ne!(replacement.id, session.id);
    assert!(sessions.load(&replacement.id).await?.is_some());

    Ok(())
}
