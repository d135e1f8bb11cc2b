//! Booking intake, checkout, payment capture, and confirmation handlers

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::{AppError, AppResult},
    models::{Booking, BookingDraft, Payment},
    session::Session,
    state::AppState,
    validation,
};

/// Booking form submission. Fields default to empty so a missing field is
/// handled by intake validation, not by deserialization.
#[derive(Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub arrivals: String,
    #[serde(default)]
    pub departure: String,
}

/// Checkout actions: drop the draft or move on to payment
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutAction {
    RemoveBooking,
    ProceedPayment,
}

/// Request for a checkout decision
#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub action: CheckoutAction,
}

/// Response for the checkout page
#[derive(Serialize)]
pub struct CheckoutResponse {
    pub booking: BookingDraft,
    pub price: i64,
}

/// Card details for payment capture
#[derive(Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub name_on_card: String,
}

/// Response for the payment confirmation page
#[derive(Serialize)]
pub struct PaymentConfirmation {
    pub booking: Option<Booking>,
    pub payment: Option<Payment>,
    pub booking_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Booking page; returns the current draft, if any
pub async fn book_page(Extension(session): Extension<Session>) -> impl IntoResponse {
    Json(json!({ "draft": session.data.booking_draft }))
}

/// Booking intake endpoint
///
/// Any missing field aborts the whole submission and sends the visitor
/// back to the form; there is no per-field error list here. The stored
/// draft always carries the logged-in user's email, whatever the form said.
pub async fn submit_booking(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Json(form): Json<BookingForm>,
) -> AppResult<Response> {
    let Some(user) = session.data.user.clone() else {
        return Ok(Redirect::to("/login").into_response());
    };

    if let Err(message) = validation::validate_booking_fields([
        form.name.as_str(),
        form.email.as_str(),
        form.phone.as_str(),
        form.address.as_str(),
        form.location.as_str(),
        form.guests.as_str(),
        form.arrivals.as_str(),
        form.departure.as_str(),
    ]) {
        info!("Booking intake rejected: {}", message);
        return Ok(Redirect::to("/book").into_response());
    }

    session.data.booking_draft = Some(BookingDraft {
        name: form.name,
        email: user.email,
        phone: form.phone,
        address: form.address,
        location: form.location,
        guests: form.guests,
        arrivals: form.arrivals,
        departure: form.departure,
    });
    state.sessions.save(&session).await?;

    Ok(Redirect::to("/checkout").into_response())
}

/// Checkout page; shows the draft and its quoted price
pub async fn checkout_page(Extension(session): Extension<Session>) -> AppResult<Response> {
    let Some(draft) = session.data.booking_draft.clone() else {
        return Ok(Redirect::to("/book").into_response());
    };

    let price = draft.price();
    Ok(Json(CheckoutResponse {
        booking: draft,
        price,
    })
    .into_response())
}

/// Checkout decision endpoint: remove the draft or proceed to payment
pub async fn checkout_action(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Response> {
    if session.data.booking_draft.is_none() {
        return Ok(Redirect::to("/book").into_response());
    }

    match request.action {
        CheckoutAction::RemoveBooking => {
            session.data.booking_draft = None;
            state.sessions.save(&session).await?;
            Ok(Redirect::to("/").into_response())
        }
        CheckoutAction::ProceedPayment => Ok(Redirect::to("/payment_gateway").into_response()),
    }
}

/// Payment gateway page
pub async fn payment_gateway_page() -> impl IntoResponse {
    Json(json!({ "errors": [] }))
}

/// Payment capture endpoint
///
/// Card-field violations are reported all at once. On a clean submission
/// the booking and payment rows are written in one transaction; any
/// failure there rolls both back and surfaces only a generic message.
pub async fn capture_payment(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Json(form): Json<PaymentForm>,
) -> AppResult<Response> {
    let card_number = form.card_number.trim();
    let expiry = form.expiry.trim();
    let cvv = form.cvv.trim();
    let name_on_card = form.name_on_card.trim();

    let errors = validation::validate_card_details(card_number, expiry, cvv, name_on_card);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let Some(draft) = session.data.booking_draft.clone() else {
        return Err(AppError::Validation(vec![
            "No booking details found in session.".to_string(),
        ]));
    };

    let price = draft.price();
    match state
        .bookings
        .capture_payment(&draft, card_number, name_on_card, price)
        .await
    {
        Ok((booking, payment)) => {
            session.data.booking_id = Some(booking.id);
            session.data.booking_code = Some(payment.booking_code.clone());
            session.data.booking_draft = None;
            state.sessions.save(&session).await?;
            Ok(Redirect::to("/payment").into_response())
        }
        Err(e) => {
            error!("Payment capture failed: {}", e);
            Err(AppError::Validation(vec![
                "Failed to process payment. Please try again.".to_string(),
            ]))
        }
    }
}

/// Payment confirmation page
///
/// Read-only: when the session has no capture to show, the empty state is
/// rendered without touching the database.
pub async fn payment_confirmation(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<PaymentConfirmation>> {
    let (Some(booking_id), Some(booking_code)) =
        (session.data.booking_id, session.data.booking_code.clone())
    else {
        return Ok(Json(PaymentConfirmation {
            booking: None,
            payment: None,
            booking_code: None,
            message: Some(
                "Booking information could not be retrieved. Please try again.".to_string(),
            ),
        }));
    };

    let payment = state.bookings.find_payment(&booking_code).await?;
    let booking = state.bookings.find_booking(booking_id).await?;

    Ok(Json(PaymentConfirmation {
        booking,
        payment,
        booking_code: Some(booking_code),
        message: None,
    }))
}
