//! SQLite implementation of the RouteRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{fold_case, Airport, Page, PageRequest, Route, RouteFilter, RouteInput};
use crate::domain::ports::RouteRepository;

use super::{to_u32, to_u64};

/// Route columns with both airports. Expects `routes r` joined with
/// `airports s` (source) and `airports d` (destination).
pub(crate) const ROUTE_COLUMNS: &str = "r.id AS route_id, r.distance AS route_distance, \
    s.id AS source_id, s.name AS source_name, s.closest_big_city AS source_city, \
    d.id AS destination_id, d.name AS destination_name, d.closest_big_city AS destination_city";

pub(crate) const ROUTE_JOINS: &str = "JOIN airports s ON s.id = r.source_id \
    JOIN airports d ON d.id = r.destination_id";

#[derive(Clone)]
pub struct SqliteRouteRepository {
    pool: SqlitePool,
}

impl SqliteRouteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<Route> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("route", id))
    }
}

/// `WHERE` conditions and their bindings for a normalized filter.
fn filter_conditions(filter: &RouteFilter) -> (String, Vec<String>) {
    let mut sql = String::from(" WHERE 1=1");
    let mut bindings = Vec::new();

    let columns = [
        ("s.city_folded", &filter.source_city),
        ("d.city_folded", &filter.destination_city),
        ("s.name_folded", &filter.source_airport),
        ("d.name_folded", &filter.destination_airport),
    ];
    for (column, value) in columns {
        if let Some(value) = value {
            sql.push_str(&format!(" AND instr({column}, ?) > 0"));
            bindings.push(fold_case(value));
        }
    }

    (sql, bindings)
}

#[async_trait]
impl RouteRepository for SqliteRouteRepository {
    async fn create(&self, input: &RouteInput) -> DomainResult<Route> {
        let id = sqlx::query("INSERT INTO routes (source_id, destination_id, distance) VALUES (?, ?, ?)")
            .bind(input.source_id)
            .bind(input.destination_id)
            .bind(i64::from(input.distance))
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Route>> {
        let sql = format!("SELECT {ROUTE_COLUMNS} FROM routes r {ROUTE_JOINS} WHERE r.id = ?");
        let row: Option<RouteRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn update(&self, id: i64, input: &RouteInput) -> DomainResult<Route> {
        let result = sqlx::query(
            "UPDATE routes SET source_id = ?, destination_id = ?, distance = ? WHERE id = ?",
        )
        .bind(input.source_id)
        .bind(input.destination_id)
        .bind(i64::from(input.distance))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("route", id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("route", id));
        }

        Ok(())
    }

    async fn list(&self, filter: &RouteFilter, page: PageRequest) -> DomainResult<Page<Route>> {
        let filter = filter.clone().normalized();
        let (conditions, bindings) = filter_conditions(&filter);

        let count_sql = format!("SELECT COUNT(*) FROM routes r {ROUTE_JOINS}{conditions}");
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for binding in &bindings {
            count_query = count_query.bind(binding);
        }
        let (count,) = count_query.fetch_one(&self.pool).await?;

        let sql = format!(
            "SELECT {ROUTE_COLUMNS} FROM routes r {ROUTE_JOINS}{conditions} ORDER BY r.id LIMIT ? OFFSET ?"
        );
        let mut query = sqlx::query_as::<_, RouteRow>(&sql);
        for binding in &bindings {
            query = query.bind(binding);
        }
        let rows = query
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
pub(crate) struct RouteRow {
    route_id: i64,
    route_distance: i64,
    source_id: i64,
    source_name: String,
    source_city: String,
    destination_id: i64,
    destination_name: String,
    destination_city: String,
}

impl TryFrom<RouteRow> for Route {
    type Error = DomainError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        Ok(Route {
            id: row.route_id,
            source: Airport {
                id: row.source_id,
                name: row.source_name,
                closest_big_city: row.source_city,
            },
            destination: Airport {
                id: row.destination_id,
                name: row.destination_name,
                closest_big_city: row.destination_city,
            },
            distance: to_u32(row.route_distance, "distance")?,
        })
    }
}
