//! SQLite implementation of the AirplaneTypeRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AirplaneType, AirplaneTypeInput, Page, PageRequest};
use crate::domain::ports::AirplaneTypeRepository;

use super::to_u64;

#[derive(Clone)]
pub struct SqliteAirplaneTypeRepository {
    pool: SqlitePool,
}

impl SqliteAirplaneTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<AirplaneType> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airplane type", id))
    }
}

#[async_trait]
impl AirplaneTypeRepository for SqliteAirplaneTypeRepository {
    async fn create(&self, input: &AirplaneTypeInput) -> DomainResult<AirplaneType> {
        let id = sqlx::query("INSERT INTO airplane_types (name) VALUES (?)")
            .bind(input.name.trim())
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<AirplaneType>> {
        let row: Option<AirplaneTypeRow> =
            sqlx::query_as("SELECT id, name FROM airplane_types WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, input: &AirplaneTypeInput) -> DomainResult<AirplaneType> {
        let result = sqlx::query("UPDATE airplane_types SET name = ? WHERE id = ?")
            .bind(input.name.trim())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airplane type", id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM airplane_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airplane type", id));
        }

        Ok(())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Page<AirplaneType>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airplane_types")
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<AirplaneTypeRow> =
            sqlx::query_as("SELECT id, name FROM airplane_types ORDER BY id LIMIT ? OFFSET ?")
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
struct AirplaneTypeRow {
    id: i64,
    name: String,
}

impl From<AirplaneTypeRow> for AirplaneType {
    fn from(row: AirplaneTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup() -> SqliteAirplaneTypeRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteAirplaneTypeRepository::new(pool)
    }

    fn input(name: &str) -> AirplaneTypeInput {
        AirplaneTypeInput {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = setup().await;
        let created = repo.create(&input("Airbus A320")).await.unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Airbus A320");
        assert!(repo.get(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let repo = setup().await;
        repo.create(&input("Boeing")).await.unwrap();

        match repo.create(&input("Boeing")).await {
            Err(DomainError::Conflict(message)) => {
                assert_eq!(message, "airplane type with this name already exists.")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = setup().await;
        let created = repo.create(&input("Old")).await.unwrap();

        let updated = repo.update(created.id, &input("New")).await.unwrap();
        assert_eq!(updated.name, "New");

        assert!(matches!(
            repo.update(999, &input("x")).await,
            Err(DomainError::NotFound { .. })
        ));
        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.delete(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_pages() {
        let repo = setup().await;
        for i in 0..12 {
            repo.create(&input(&format!("Type {i}"))).await.unwrap();
        }

        let first = repo.list(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(first.count, 12);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next());

        let second = repo.list(PageRequest::new(2, 10)).await.unwrap();
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[0].name, "Type 10");

        assert!(matches!(
            repo.list(PageRequest::new(3, 10)).await,
            Err(DomainError::InvalidPage)
        ));
    }
}
