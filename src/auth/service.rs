use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::password::verify_password;
use super::session::{Session, SessionStore};
use super::users::{User, UserDirectory};
use crate::config::AuthConfig;
use crate::error::{AppError, AuthError};

const TOKEN_BYTES: usize = 32;

/// Upper bound for `auth.session_ttl_seconds` (ten years).
pub const MAX_SESSION_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

pub struct AuthService {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserDirectory>,
    session_ttl: Duration,
    demo_mode: bool,
}

impl AuthService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserDirectory>,
        config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let session_ttl = session_ttl(config.session_ttl_seconds)?;
        if config.demo_mode {
            warn!("Demo mode is enabled: passwords are not verified");
        }
        Ok(Self {
            sessions,
            users,
            session_ttl,
            demo_mode: config.demo_mode,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Returns the user for a known email whose password matches.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let record = self.users.find_by_email(email)?;
        if self.demo_mode || verify_password(password, &record.password_hash) {
            Some(record.user)
        } else {
            None
        }
    }

    pub async fn create_session(&self, user_id: &str) -> Result<String, AppError> {
        let token = generate_token();
        let session = Session::new(token.clone(), user_id.to_string(), self.session_ttl);
        self.sessions.set(session).await?;
        info!(user_id, "Session created");
        Ok(token)
    }

    /// Resolves a token to its user id. Expired sessions are dropped on read.
    pub async fn validate_session(&self, token: &str) -> Result<Option<String>, AppError> {
        let Some(session) = self.sessions.get(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            debug!(user_id = %session.user_id, "Dropping expired session");
            self.sessions.delete(token).await?;
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    pub fn get_user_by_id(&self, user_id: &str) -> Option<User> {
        self.users.find_by_id(user_id)
    }

    pub async fn end_session(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete(token).await
    }

    /// The user behind an optional session cookie, or the auth error to return.
    pub async fn current_user(&self, token: Option<&str>) -> Result<User, AppError> {
        let token = token.ok_or(AuthError::NotAuthenticated)?;
        let user_id = self
            .validate_session(token)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        self.get_user_by_id(&user_id)
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    pub async fn purge_expired_sessions(&self) -> Result<usize, AppError> {
        self.sessions.purge_expired(Utc::now()).await
    }
}

fn session_ttl(seconds: i64) -> Result<Duration, AppError> {
    if !(1..=MAX_SESSION_TTL_SECONDS).contains(&seconds) {
        return Err(AppError::ConfigError(format!(
            "auth.session_ttl_seconds must be between 1 and {}, got {}",
            MAX_SESSION_TTL_SECONDS, seconds
        )));
    }
    Ok(Duration::seconds(seconds))
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
