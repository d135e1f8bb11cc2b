//! Server-side sessions backed by Redis
//!
//! The session id travels in an `sid` cookie; everything else stays on the
//! server as a JSON blob under `session:{id}` with a TTL. Handlers receive
//! a `Session` snapshot through request extensions and persist mutations
//! back through the `SessionStore`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::cache::RedisPool;

use crate::models::{BookingDraft, SessionUser};

/// Name of the session id cookie
pub const SESSION_COOKIE: &str = "sid";

const DEFAULT_TTL_SECONDS: u64 = 86_400;

/// Everything the service keeps per visitor between requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    /// Authenticated user, `None` for anonymous visitors
    pub user: Option<SessionUser>,
    /// Draft booking awaiting checkout and payment capture
    pub booking_draft: Option<BookingDraft>,
    /// Identifier of the most recently captured booking
    pub booking_id: Option<i64>,
    /// Correlation code of the most recently captured payment
    pub booking_code: Option<String>,
}

impl SessionData {
    /// Whether a user is present in the session
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// A loaded session: id plus current data snapshot
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub data: SessionData,
}

impl Session {
    /// Create a fresh anonymous session with a new random id
    pub fn fresh() -> Self {
        Session {
            id: Uuid::new_v4().to_string(),
            data: SessionData::default(),
        }
    }
}

/// Store for session blobs in Redis
#[derive(Clone)]
pub struct SessionStore {
    redis: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store
    ///
    /// # Environment Variables
    /// - `SESSION_TTL_SECONDS`: session lifetime (default: 86400)
    pub fn new(redis: RedisPool) -> Self {
        let ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);
        Self { redis, ttl_seconds }
    }

    fn key(id: &str) -> String {
        format!("session:{}", id)
    }

    /// Resolve the session for a request from its cookie value.
    ///
    /// A known id returns the stored session. An absent, unknown, or
    /// expired id mints a fresh session and persists it immediately, so
    /// the id handed out as a cookie stays valid on the next request.
    /// The flag reports whether a new cookie needs to be set.
    pub async fn open(&self, cookie_id: Option<String>) -> Result<(Session, bool)> {
        if let Some(id) = cookie_id {
            if let Some(data) = self.load(&id).await? {
                return Ok((Session { id, data }, false));
            }
        }

        let session = Session::fresh();
        self.save(&session).await?;
        Ok((session, true))
    }

    /// Load session data by id, `None` when unknown or expired
    pub async fn load(&self, id: &str) -> Result<Option<SessionData>> {
        let raw = self.redis.get(&Self::key(id)).await?;
        match raw {
            Some(json) => {
                let data = serde_json::from_str(&json)?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Persist a session, refreshing its TTL
    pub async fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(&session.data)?;
        self.redis
            .set(&Self::key(&session.id), &json, Some(self.ttl_seconds))
            .await?;
        Ok(())
    }
}
