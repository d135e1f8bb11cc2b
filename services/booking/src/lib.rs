//! Palmstay booking service
//!
//! Registration and login over Redis-backed sessions, a session-held
//! booking draft, checkout, a single-transaction payment capture, and a
//! proxy to an upstream generative-text API.

pub mod chat;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
