//! SQLite implementation of the CrewRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Crew, CrewInput, Page, PageRequest};
use crate::domain::ports::CrewRepository;

use super::{placeholders, to_u64};

#[derive(Clone)]
pub struct SqliteCrewRepository {
    pool: SqlitePool,
}

impl SqliteCrewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<Crew> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("crew", id))
    }
}

#[async_trait]
impl CrewRepository for SqliteCrewRepository {
    async fn create(&self, input: &CrewInput) -> DomainResult<Crew> {
        let id = sqlx::query("INSERT INTO crew (first_name, last_name) VALUES (?, ?)")
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Crew>> {
        let row: Option<CrewRow> =
            sqlx::query_as("SELECT id, first_name, last_name FROM crew WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn get_many(&self, ids: &[i64]) -> DomainResult<Vec<Crew>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, first_name, last_name FROM crew WHERE id IN ({}) ORDER BY id",
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, CrewRow>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, input: &CrewInput) -> DomainResult<Crew> {
        let result = sqlx::query("UPDATE crew SET first_name = ?, last_name = ? WHERE id = ?")
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("crew", id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM crew WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("crew", id));
        }

        Ok(())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Page<Crew>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM crew")
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<CrewRow> = sqlx::query_as(
            "SELECT id, first_name, last_name FROM crew ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Page::new(
            rows.into_iter().map(Into::into).collect(),
            to_u64(count, "count")?,
            page,
        )
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CrewRow {
    id: i64,
    first_name: String,
    last_name: String,
}

impl From<CrewRow> for Crew {
    fn from(row: CrewRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}
