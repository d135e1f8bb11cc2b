//! Booking service models

pub mod booking;
pub mod user;

// Re-export for convenience
pub use booking::{Booking, BookingDraft, Payment, PRICE_PER_GUEST, quote_price};
pub use user::{NewUser, SessionUser, User};
