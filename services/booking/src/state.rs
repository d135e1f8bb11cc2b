//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    chat::ChatClient,
    repositories::{BookingRepository, UserRepository},
    session::SessionStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: SessionStore,
    pub users: UserRepository,
    pub bookings: BookingRepository,
    pub chat: ChatClient,
}
