use serde::{Deserialize, Serialize};

use super::password::hash_password;
use crate::config::DemoUserConfig;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// A directory entry: the public user plus its Argon2 PHC hash.
#[derive(Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

impl UserRecord {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: Option<String>,
        password: &str,
    ) -> Result<Self, AppError> {
        Ok(Self {
            user: User {
                id: id.into(),
                email: email.into(),
                name,
            },
            password_hash: hash_password(password)?,
        })
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;
    fn find_by_id(&self, id: &str) -> Option<User>;
}

/// Fixed set of users loaded at startup.
#[derive(Debug, Default)]
pub struct StaticUserDirectory {
    users: Vec<UserRecord>,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn from_demo_user(config: &DemoUserConfig) -> Result<Self, AppError> {
        Ok(Self::new(vec![UserRecord::new(
            config.id.clone(),
            config.email.clone(),
            config.name.clone(),
            &config.password,
        )?]))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for StaticUserDirectory {
    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.iter().find(|r| r.user.email == email).cloned()
    }

    fn find_by_id(&self, id: &str) -> Option<User> {
        self.users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticUserDirectory {
        StaticUserDirectory::new(vec![
            UserRecord::new("1", "demo@example.com", Some("Demo User".into()), "pw1").unwrap(),
            UserRecord::new("2", "ops@example.com", None, "pw2").unwrap(),
        ])
    }

    #[test]
    fn test_find_by_email_is_exact() {
        let dir = directory();
        assert_eq!(dir.find_by_email("demo@example.com").unwrap().user.id, "1");
        assert!(dir.find_by_email("DEMO@example.com").is_none());
        assert!(dir.find_by_email(" demo@example.com").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let dir = directory();
        assert_eq!(dir.find_by_id("2").unwrap().email, "ops@example.com");
        assert!(dir.find_by_id("3").is_none());
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_debug_hides_password_hash() {
        let record = UserRecord::new("1", "demo@example.com", None, "pw1").unwrap();
        let debug = format!("{:?}", record);
        assert!(debug.contains("demo@example.com"));
        assert!(!debug.contains(&record.password_hash));
    }
}
