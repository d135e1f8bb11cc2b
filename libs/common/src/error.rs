//! Shared error types for the infrastructure layer

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Errors from database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while connecting to the database
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred while executing a query
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Errors from the Redis cache backing sessions
#[derive(Error, Debug)]
pub enum CacheError {
    /// Error talking to Redis
    #[error("Cache error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stored value could not be decoded
    #[error("Cache value decode error: {0}")]
    Decode(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
