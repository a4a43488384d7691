//! SQLite implementation of the AirportRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{fold_case, Airport, AirportConnections, AirportInput, Page, PageRequest};
use crate::domain::ports::AirportRepository;

use super::to_u64;

#[derive(Clone)]
pub struct SqliteAirportRepository {
    pool: SqlitePool,
}

impl SqliteAirportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<Airport> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airport", id))
    }

    async fn connected_names(&self, sql: &str, id: i64) -> DomainResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(sql).bind(id).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

#[async_trait]
impl AirportRepository for SqliteAirportRepository {
    async fn create(&self, input: &AirportInput) -> DomainResult<Airport> {
        let id = sqlx::query(
            "INSERT INTO airports (name, closest_big_city, name_folded, city_folded) VALUES (?, ?, ?, ?)",
        )
        .bind(input.name.trim())
        .bind(input.closest_big_city.trim())
        .bind(fold_case(&input.name))
        .bind(fold_case(&input.closest_big_city))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Airport>> {
        let row: Option<AirportRow> =
            sqlx::query_as("SELECT id, name, closest_big_city FROM airports WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn get_connections(&self, id: i64) -> DomainResult<Option<AirportConnections>> {
        let Some(airport) = self.get(id).await? else {
            return Ok(None);
        };

        let depart_for = self
            .connected_names(
                "SELECT d.name FROM routes r JOIN airports d ON d.id = r.destination_id
                 WHERE r.source_id = ? ORDER BY r.id",
                id,
            )
            .await?;
        let accepts_from = self
            .connected_names(
                "SELECT s.name FROM routes r JOIN airports s ON s.id = r.source_id
                 WHERE r.destination_id = ? ORDER BY r.id",
                id,
            )
            .await?;

        Ok(Some(AirportConnections {
            airport,
            depart_for,
            accepts_from,
        }))
    }

    async fn update(&self, id: i64, input: &AirportInput) -> DomainResult<Airport> {
        let result = sqlx::query(
            "UPDATE airports SET name = ?, closest_big_city = ?, name_folded = ?, city_folded = ? WHERE id = ?",
        )
        .bind(input.name.trim())
        .bind(input.closest_big_city.trim())
        .bind(fold_case(&input.name))
        .bind(fold_case(&input.closest_big_city))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airport", id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM airports WHERE id = ?")
            .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airport", id));
        }

        Ok(())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<Page<Airport>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airports")
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<AirportRow> = sqlx::query_as(
            "SELECT id, name, closest_big_city FROM airports ORDER BY id LIMIT ? OFFSET ?",
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
struct AirportRow {
    id: i64,
    name: String,
    closest_big_city: String,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            closest_big_city: row.closest_big_city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    fn input(name: &str, city: &str) -> AirportInput {
        AirportInput {
            name: name.to_string(),
            closest_big_city: city.to_string(),
        }
    }

    #[tokio::test]
    async fn test_connections() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = SqliteAirportRepository::new(pool.clone());
        let kyiv = repo.create(&input("Boryspil", "Kyiv")).await.unwrap();
        let lviv = repo.create(&input("Danylo Halytskyi", "Lviv")).await.unwrap();
        let odesa = repo.create(&input("Odesa International", "Odesa")).await.unwrap();

        for (source, destination) in [(kyiv.id, lviv.id), (kyiv.id, odesa.id), (lviv.id, kyiv.id)] {
            sqlx::query("INSERT INTO routes (source_id, destination_id, distance) VALUES (?, ?, 500)")
                .bind(source)
                .bind(destination)
                .execute(&pool)
                .await
                .unwrap();
        }

        let connections = repo.get_connections(kyiv.id).await.unwrap().unwrap();
        assert_eq!(connections.depart_for, ["Danylo Halytskyi", "Odesa International"]);
        assert_eq!(connections.accepts_from, ["Danylo Halytskyi"]);

        let lonely = repo.get_connections(odesa.id).await.unwrap().unwrap();
        assert!(lonely.depart_for.is_empty());
        assert!(repo.get_connections(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_trims_input() {
        let pool = create_migrated_test_pool().await.unwrap();
        let repo = SqliteAirportRepository::new(pool);
        let airport = repo.create(&input("Heathrow", "London")).await.unwrap();

        let updated = repo.update(airport.id, &input(" Gatwick ", "London")).await.unwrap();
        assert_eq!(updated.name, "Gatwick");

        let page = repo.list(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.count, 1);
    }
}
