//! Registration, token login and self-service account management.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{normalize_email, NewUser, User, UserUpdate};
use crate::domain::ports::{UserRecord, UserRepository};
use crate::infrastructure::credentials::{generate_token, hash_password, verify_password};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    fn email_taken(err: DomainError) -> DomainError {
        match err {
            DomainError::Conflict(_) => {
                DomainError::invalid_field("email", "user with this email already exists.")
            }
            other => other,
        }
    }

    pub async fn register(&self, new_user: &NewUser) -> DomainResult<User> {
        new_user.validate()?;
        let record = UserRecord {
            email: normalize_email(&new_user.email),
            password_hash: hash_password(&new_user.password),
            first_name: new_user.first_name.trim().to_string(),
            last_name: new_user.last_name.trim().to_string(),
            is_staff: new_user.is_staff,
        };
        let user = self.users.create(&record).await.map_err(Self::email_taken)?;
        tracing::info!(user_id = user.id, is_staff = user.is_staff, "user registered");
        Ok(user)
    }

    /// Register a staff account.
    pub async fn create_admin(&self, mut new_user: NewUser) -> DomainResult<User> {
        new_user.is_staff = true;
        self.register(&new_user).await
    }

    /// Exchange credentials for the user's API token.
    ///
    /// The same token is returned on every login until the user is deleted.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        let Some(user) = self.users.find_by_email(&normalize_email(email)).await? else {
            tracing::debug!("login for unknown email");
            return Err(DomainError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }
        self.users.get_or_create_token(user.id, &generate_token()).await
    }

    /// Resolve a token to its user.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        self.users.find_by_token(token).await
    }

    pub async fn me(&self, user_id: i64) -> DomainResult<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    pub async fn update_me(&self, user_id: i64, update: &UserUpdate) -> DomainResult<User> {
        update.validate()?;
        let mut user = self.me(user_id).await?;

        if let Some(email) = &update.email {
            user.email = normalize_email(email);
        }
        if let Some(password) = &update.password {
            user.password_hash = hash_password(password);
        }
        if let Some(first_name) = &update.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = &update.last_name {
            user.last_name = last_name.trim().to_string();
        }

        self.users.update(&user).await.map_err(Self::email_taken)?;
        tracing::info!(user_id, password_changed = update.password.is_some(), "user updated");
        Ok(user)
    }

    pub async fn delete_me(&self, user_id: i64) -> DomainResult<()> {
        self.users.delete(user_id).await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
