//! Booking repository: the payment-capture transaction and confirmation reads

use anyhow::Result;
use rand::Rng;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Booking, BookingDraft, Payment};

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Capture a payment: persist the draft as a booking row and a payment
    /// row inside one transaction.
    ///
    /// The two inserts either both commit or both roll back; an error from
    /// either leaves no partial state behind. The returned payment carries
    /// the freshly generated correlation code.
    pub async fn capture_payment(
        &self,
        draft: &BookingDraft,
        card_number: &str,
        name_on_card: &str,
        price: i64,
    ) -> Result<(Booking, Payment)> {
        let booking_code = generate_booking_code();

        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO book_form (name, email, phone, address, location, guests, arrivals, departure)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, address, location, guests, arrivals, departure, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.location)
        .bind(&draft.guests)
        .bind(&draft.arrivals)
        .bind(&draft.departure)
        .fetch_one(&mut *tx)
        .await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (booking_code, card_number, name_on_card, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, booking_code, card_number, name_on_card, price, created_at
            "#,
        )
        .bind(&booking_code)
        .bind(card_number)
        .bind(name_on_card)
        .bind(price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Captured payment {} for booking {}",
            payment.booking_code, booking.id
        );
        Ok((booking, payment))
    }

    /// Look up a booking by its row id
    pub async fn find_booking(&self, id: i64) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, name, email, phone, address, location, guests, arrivals, departure, created_at
            FROM book_form
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Look up a payment by its correlation code
    pub async fn find_payment(&self, booking_code: &str) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, booking_code, card_number, name_on_card, price, created_at
            FROM payments
            WHERE booking_code = $1
            "#,
        )
        .bind(booking_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }
}

/// Generate the 8-hex-character correlation code linking a payment to its
/// booking. Random rather than derived from the booking id; collisions are
/// unlikely but possible.
fn generate_booking_code() -> String {
    format!("{:08x}", rand::thread_rng().r#gen::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_code_is_eight_hex_chars() {
        for _ in 0..100 {
            let code = generate_booking_code();
            assert_eq!(code.len(), 8);
            assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
