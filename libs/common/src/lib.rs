//! Shared infrastructure for the Palmstay booking platform
//!
//! This crate holds the pieces the booking service needs underneath its
//! request handling: the PostgreSQL connection pool, the Redis cache that
//! backs server-side sessions, and the shared error types.

pub mod cache;
pub mod database;
pub mod error;
