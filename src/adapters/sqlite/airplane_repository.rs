//! SQLite implementation of the AirplaneRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Airplane, AirplaneInput, AirplaneSortField, AirplaneType, Ordering, Page, PageRequest,
};
use crate::domain::ports::AirplaneRepository;

use super::{order_by_clause, to_u32, to_u64};

/// Airplane columns with their type and flight count, aliased so they can be
/// flattened into other rows. Expects `airplanes a` joined with
/// `airplane_types t`.
pub(crate) const AIRPLANE_COLUMNS: &str = "a.id AS airplane_id, a.name AS airplane_name, \
    a.row_count AS airplane_rows, a.seats_in_row AS airplane_seats_in_row, \
    a.image AS airplane_image, t.id AS airplane_type_id, t.name AS airplane_type_name, \
    (SELECT COUNT(*) FROM flights uf WHERE uf.airplane_id = a.id) AS airplane_flights";

const AIRPLANE_FROM: &str = "airplanes a JOIN airplane_types t ON t.id = a.airplane_type_id";

fn sort_column(field: AirplaneSortField) -> &'static str {
    match field {
        AirplaneSortField::Id => "a.id",
        AirplaneSortField::Name => "a.name",
        AirplaneSortField::Rows => "a.row_count",
        AirplaneSortField::SeatsInRow => "a.seats_in_row",
        AirplaneSortField::AirplaneTypeName => "t.name",
    }
}

#[derive(Clone)]
pub struct SqliteAirplaneRepository {
    pool: SqlitePool,
}

impl SqliteAirplaneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<Airplane> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airplane", id))
    }
}

#[async_trait]
impl AirplaneRepository for SqliteAirplaneRepository {
    async fn create(&self, input: &AirplaneInput) -> DomainResult<Airplane> {
        let id = sqlx::query(
            "INSERT INTO airplanes (name, row_count, seats_in_row, airplane_type_id) VALUES (?, ?, ?, ?)",
        )
        .bind(input.name.trim())
        .bind(i64::from(input.rows))
        .bind(i64::from(input.seats_in_row))
        .bind(input.airplane_type_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Airplane>> {
        let sql = format!("SELECT {AIRPLANE_COLUMNS} FROM {AIRPLANE_FROM} WHERE a.id = ?");
        let row: Option<AirplaneRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, id: i64, input: &AirplaneInput) -> DomainResult<Airplane> {
        let result = sqlx::query(
            "UPDATE airplanes SET name = ?, row_count = ?, seats_in_row = ?, airplane_type_id = ? WHERE id = ?",
        )
        .bind(input.name.trim())
        .bind(i64::from(input.rows))
        .bind(i64::from(input.seats_in_row))
        .bind(input.airplane_type_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airplane", id));
        }

        self.fetch(id).await
    }

    async fn set_image(&self, id: i64, image: Option<&str>) -> DomainResult<Airplane> {
        let result = sqlx::query("UPDATE airplanes SET image = ? WHERE id = ?")
            .bind(image)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airplane", id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM airplanes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("airplane", id));
        }

        Ok(())
    }

    async fn list(
        &self,
        ordering: Option<&Ordering<AirplaneSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Airplane>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airplanes")
            .fetch_one(&self.pool)
            .await?;

        let order_by = ordering.map_or_else(
            || "a.id ASC".to_string(),
            |o| order_by_clause(o, sort_column, "a.id"),
        );
        let sql = format!(
            "SELECT {AIRPLANE_COLUMNS} FROM {AIRPLANE_FROM} ORDER BY {order_by} LIMIT ? OFFSET ?"
        );
        let rows: Vec<AirplaneRow> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<DomainResult<Vec<_>>>()?;
        Page::new(items, to_u64(count, "count")?, page)
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AirplaneRow {
    airplane_id: i64,
    airplane_name: String,
    airplane_rows: i64,
    airplane_seats_in_row: i64,
    airplane_image: Option<String>,
    airplane_type_id: i64,
    airplane_type_name: String,
    airplane_flights: i64,
}

impl TryFrom<AirplaneRow> for Airplane {
    type Error = DomainError;

    fn try_from(row: AirplaneRow) -> Result<Self, Self::Error> {
        Ok(Airplane {
            id: row.airplane_id,
            name: row.airplane_name,
            rows: to_u32(row.airplane_rows, "row_count")?,
            seats_in_row: to_u32(row.airplane_seats_in_row, "seats_in_row")?,
            image: row.airplane_image,
            airplane_type: AirplaneType {
                id: row.airplane_type_id,
                name: row.airplane_type_name,
            },
            used_in_flights: to_u64(row.airplane_flights, "flights")?,
        })
    }
}
