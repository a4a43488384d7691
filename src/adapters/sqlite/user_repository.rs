//! SQLite implementation of the UserRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::User;
use crate::domain::ports::{UserRecord, UserRepository};

use super::{format_datetime, parse_datetime};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, is_staff, created_at";

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, record: &UserRecord) -> DomainResult<User> {
        let id = sqlx::query(
            "INSERT INTO users (email, password_hash, first_name, last_name, is_staff, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.is_staff)
        .bind(format_datetime(Utc::now()))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE users SET email = ?, password_hash = ?, first_name = ?, last_name = ?, is_staff = ?
             WHERE id = ?",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_staff)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user", user.id));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user", id));
        }

        Ok(())
    }

    async fn get_or_create_token(&self, user_id: i64, candidate: &str) -> DomainResult<String> {
        sqlx::query("INSERT OR IGNORE INTO auth_tokens (key, user_id, created_at) VALUES (?, ?, ?)")
            .bind(candidate)
            .bind(user_id)
            .bind(format_datetime(Utc::now()))
            .execute(&self.pool)
            .await?;

        let (key,): (String,) = sqlx::query_as("SELECT key FROM auth_tokens WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(key)
    }

    async fn find_by_token(&self, key: &str) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT u.id, u.email, u.password_hash, u.first_name, u.last_name, u.is_staff, u.created_at
             FROM auth_tokens k JOIN users u ON u.id = k.user_id WHERE k.key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    is_staff: bool,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            is_staff: row.is_staff,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}
