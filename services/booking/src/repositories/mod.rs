//! Repositories for database operations

pub mod booking;
pub mod user;

pub use booking::BookingRepository;
pub use user::UserRepository;
