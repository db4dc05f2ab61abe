//! Authentication for the import backend
//!
//! Credential checks against the user directory, opaque session tokens
//! and the cookie-based login/logout/me handlers.

pub mod handlers;
mod password;
mod service;
mod session;
mod users;

pub use password::{hash_password, verify_password};
pub use service::{AuthService, MAX_SESSION_TTL_SECONDS};
pub use session::{InMemorySessionStore, Session, SessionStore};
pub use users::{StaticUserDirectory, User, UserDirectory, UserRecord};
