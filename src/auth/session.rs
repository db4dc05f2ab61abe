use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::AppError;

/// Server-side record behind a session token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user_id: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Storage seam for sessions, so a persistent backend can replace the
/// in-memory map without touching the auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, token: &str) -> Result<Option<Session>, AppError>;
    async fn set(&self, session: Session) -> Result<(), AppError>;
    /// Deleting an unknown token is not an error.
    async fn delete(&self, token: &str) -> Result<(), AppError>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, token: &str) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    async fn set(&self, session: Session) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session);
        debug!(active = sessions.len(), "Session stored");
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), AppError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - sessions.len())
    }
}
