//! Booking and payment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fixed per-guest nightly package rate. Business rule, not derived.
pub const PRICE_PER_GUEST: i64 = 10_000;

/// Transient booking data held in the session between the booking form
/// and payment capture. All fields are the raw form strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub guests: String,
    pub arrivals: String,
    pub departure: String,
}

impl BookingDraft {
    /// Quoted price for this draft. A guest count that does not parse is
    /// treated as zero guests.
    pub fn price(&self) -> i64 {
        let guests = self.guests.trim().parse::<i64>().unwrap_or(0);
        quote_price(guests)
    }
}

/// Persisted booking row, written at payment-capture time
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub guests: String,
    pub arrivals: String,
    pub departure: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted payment row. `booking_code` is the random correlation code
/// shared with the session, not a foreign key to `book_form`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub booking_code: String,
    pub card_number: String,
    pub name_on_card: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Compute the quoted price for a guest count
pub fn quote_price(guests: i64) -> i64 {
    guests * PRICE_PER_GUEST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_price_scales_with_guests() {
        assert_eq!(quote_price(1), 10_000);
        assert_eq!(quote_price(2), 20_000);
        assert_eq!(quote_price(3), 30_000);
        assert_eq!(quote_price(5), 50_000);
    }

    #[test]
    fn test_draft_price_parses_guest_count() {
        let mut draft = sample_draft();
        draft.guests = "4".to_string();
        assert_eq!(draft.price(), 40_000);

        draft.guests = "not a number".to_string();
        assert_eq!(draft.price(), 0);
    }

    fn sample_draft() -> BookingDraft {
        BookingDraft {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5550001111".to_string(),
            address: "12 Analytical Way".to_string(),
            location: "Lagoon View".to_string(),
            guests: "2".to_string(),
            arrivals: "2025-07-01".to_string(),
            departure: "2025-07-05".to_string(),
        }
    }
}
