//! User and auth token repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::User;

/// Fields persisted for a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

/// Repository interface for User persistence and token lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, record: &UserRecord) -> DomainResult<User>;

    async fn get(&self, id: i64) -> DomainResult<Option<User>>;

    /// Look up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Persist every mutable field of `user`.
    async fn update(&self, user: &User) -> DomainResult<()>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Return the user's token, storing `candidate` if none exists yet.
    async fn get_or_create_token(&self, user_id: i64, candidate: &str) -> DomainResult<String>;

    async fn find_by_token(&self, key: &str) -> DomainResult<Option<User>>;
}
