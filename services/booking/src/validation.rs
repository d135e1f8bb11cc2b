//! Input validation for registration, login, booking intake, and card details
//!
//! Two deliberate styles coexist here. Registration, login, and card
//! validation accumulate every violated rule into an ordered list of
//! messages. Booking intake instead fails fast on the first missing field
//! with one generic message.

use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Failed to compile email regex")
    })
}

fn card_number_regex() -> &'static Regex {
    static CARD_REGEX: OnceLock<Regex> = OnceLock::new();
    CARD_REGEX.get_or_init(|| Regex::new(r"^\d{16}$").expect("Failed to compile card regex"))
}

fn expiry_regex() -> &'static Regex {
    static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
    EXPIRY_REGEX
        .get_or_init(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("Failed to compile expiry regex"))
}

fn cvv_regex() -> &'static Regex {
    static CVV_REGEX: OnceLock<Regex> = OnceLock::new();
    CVV_REGEX.get_or_init(|| Regex::new(r"^\d{3}$").expect("Failed to compile CVV regex"))
}

/// Check an email against the basic `local@domain.tld` pattern
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate a registration submission, collecting every violated rule in order
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    if username.is_empty() {
        errors.push("Username is required.".to_string());
    }
    if email.is_empty() || !is_valid_email(email) {
        errors.push("Valid email is required.".to_string());
    }
    if password.is_empty() {
        errors.push("Password is required.".to_string());
    }
    if password != confirm_password {
        errors.push("Passwords do not match.".to_string());
    }

    errors
}

/// Validate a login submission, collecting every violated rule in order
pub fn validate_login(email: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if email.is_empty() || !is_valid_email(email) {
        errors.push("Valid email is required.".to_string());
    }
    if password.is_empty() {
        errors.push("Password is required.".to_string());
    }

    errors
}

/// Validate booking intake fields. Fails fast on the first missing field
/// with one generic message; no per-field detail is accumulated. Only
/// emptiness counts as missing; the raw form value is otherwise taken
/// as submitted.
pub fn validate_booking_fields<'a, I>(fields: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a str>,
{
    for field in fields {
        if field.is_empty() {
            return Err("All details are mandatory.".to_string());
        }
    }
    Ok(())
}

/// Validate card details for payment capture, collecting every violated
/// rule in order.
pub fn validate_card_details(
    card_number: &str,
    expiry: &str,
    cvv: &str,
    name_on_card: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    if !card_number_regex().is_match(card_number) {
        errors.push("Please enter a valid 16-digit card number.".to_string());
    }
    if !expiry_regex().is_match(expiry) {
        errors.push("Please enter a valid expiry date in MM/YY format.".to_string());
    }
    if !cvv_regex().is_match(cvv) {
        errors.push("Please enter a valid 3-digit CVV.".to_string());
    }
    if name_on_card.is_empty() {
        errors.push("Please enter the name on the card.".to_string());
    }

    errors
}
