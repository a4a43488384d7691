//! SQLite implementation of the FlightRepository.
//!
//! Flights are loaded in batches: one joined query for the flight, route and
//! airplane columns, then one query each for crew and sold seats. The order
//! repository reuses [`load_flights`] to hydrate ticket flights.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Crew, Flight, FlightFilter, FlightInput, FlightSortField, Ordering, Page, PageRequest, Seat,
};
use crate::domain::ports::FlightRepository;

use super::airplane_repository::{AirplaneRow, AIRPLANE_COLUMNS};
use super::crew_repository::CrewRow;
use super::route_repository::{RouteRow, ROUTE_COLUMNS, ROUTE_JOINS};
use super::{format_datetime, order_by_clause, parse_datetime, placeholders, to_u32, to_u64};

fn flight_from() -> String {
    format!(
        "flights f JOIN routes r ON r.id = f.route_id {ROUTE_JOINS} \
         JOIN airplanes a ON a.id = f.airplane_id \
         JOIN airplane_types t ON t.id = a.airplane_type_id"
    )
}

fn sort_column(field: FlightSortField) -> &'static str {
    match field {
        FlightSortField::Id => "f.id",
        FlightSortField::AirplaneName => "a.name",
        FlightSortField::DepartureTime => "f.departure_time",
        FlightSortField::ArrivalTime => "f.arrival_time",
    }
}

/// `WHERE` conditions and their bindings. Stored timestamps are fixed width,
/// so string comparison is chronological.
fn filter_conditions(filter: &FlightFilter) -> (String, Vec<String>) {
    let mut sql = String::from(" WHERE 1=1");
    let mut bindings = Vec::new();

    for (column, window) in [
        ("f.departure_time", filter.departure_day),
        ("f.arrival_time", filter.arrival_day),
    ] {
        if let Some(window) = window {
            sql.push_str(&format!(" AND {column} >= ? AND {column} < ?"));
            bindings.push(format_datetime(window.start));
            bindings.push(format_datetime(window.end));
        }
    }

    let bounds = [
        ("f.departure_time", ">=", filter.departure_from),
        ("f.arrival_time", ">=", filter.arrival_from),
        ("f.departure_time", "<=", filter.departure_until),
        ("f.arrival_time", "<=", filter.arrival_until),
    ];
    for (column, op, bound) in bounds {
        if let Some(bound) = bound {
            sql.push_str(&format!(" AND {column} {op} ?"));
            bindings.push(format_datetime(bound));
        }
    }

    (sql, bindings)
}

/// Load fully populated flights for `ids`, preserving the order of `ids`.
/// Ids that do not exist are skipped.
pub(crate) async fn load_flights(pool: &SqlitePool, ids: &[i64]) -> DomainResult<Vec<Flight>> {
    let unique: Vec<i64> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if unique.is_empty() {
        return Ok(Vec::new());
    }
    let marks = placeholders(unique.len());

    let sql = format!(
        "SELECT f.id AS flight_id, f.departure_time, f.arrival_time, {ROUTE_COLUMNS}, {AIRPLANE_COLUMNS} \
         FROM {} WHERE f.id IN ({marks})",
        flight_from()
    );
    let mut query = sqlx::query_as::<_, FlightRow>(&sql);
    for id in &unique {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;

    let crew_sql = format!(
        "SELECT fc.flight_id, c.id, c.first_name, c.last_name FROM flight_crew fc \
         JOIN crew c ON c.id = fc.crew_id WHERE fc.flight_id IN ({marks}) ORDER BY c.id"
    );
    let mut crew_query = sqlx::query_as::<_, FlightCrewRow>(&crew_sql);
    for id in &unique {
        crew_query = crew_query.bind(id);
    }
    let mut crew: HashMap<i64, Vec<Crew>> = HashMap::new();
    for row in crew_query.fetch_all(pool).await? {
        crew.entry(row.flight_id).or_default().push(row.crew.into());
    }

    let seat_sql = format!(
        "SELECT flight_id, seat_row, seat FROM tickets WHERE flight_id IN ({marks}) \
         ORDER BY seat_row, seat"
    );
    let mut seat_query = sqlx::query_as::<_, (i64, i64, i64)>(&seat_sql);
    for id in &unique {
        seat_query = seat_query.bind(id);
    }
    let mut seats: HashMap<i64, Vec<Seat>> = HashMap::new();
    for (flight_id, row, seat) in seat_query.fetch_all(pool).await? {
        seats.entry(flight_id).or_default().push(Seat {
            row: to_u32(row, "seat_row")?,
            seat: to_u32(seat, "seat")?,
        });
    }

    let mut flights: HashMap<i64, Flight> = HashMap::with_capacity(rows.len());
    for row in rows {
        let id = row.flight_id;
        let flight = Flight {
            id,
            route: row.route.try_into()?,
            airplane: row.airplane.try_into()?,
            departure_time: parse_datetime(&row.departure_time)?,
            arrival_time: parse_datetime(&row.arrival_time)?,
            crew: crew.remove(&id).unwrap_or_default(),
            taken_places: seats.remove(&id).unwrap_or_default(),
        };
        flights.insert(id, flight);
    }

    Ok(ids.iter().filter_map(|id| flights.get(id).cloned()).collect())
}

async fn assign_crew(tx: &mut Transaction<'_, Sqlite>, flight_id: i64, crew_ids: &[i64]) -> DomainResult<()> {
    for crew_id in crew_ids.iter().collect::<BTreeSet<_>>() {
        sqlx::query("INSERT INTO flight_crew (flight_id, crew_id) VALUES (?, ?)")
            .bind(flight_id)
            .bind(crew_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct SqliteFlightRepository {
    pool: SqlitePool,
}

impl SqliteFlightRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> DomainResult<Flight> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("flight", id))
    }
}

#[async_trait]
impl FlightRepository for SqliteFlightRepository {
    async fn create(&self, input: &FlightInput) -> DomainResult<Flight> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            "INSERT INTO flights (route_id, airplane_id, departure_time, arrival_time) VALUES (?, ?, ?, ?)",
        )
        .bind(input.route_id)
        .bind(input.airplane_id)
        .bind(format_datetime(input.departure_time))
        .bind(format_datetime(input.arrival_time))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        assign_crew(&mut tx, id, &input.crew_ids).await?;
        tx.commit().await?;

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Flight>> {
        Ok(load_flights(&self.pool, &[id]).await?.pop())
    }

    async fn update(&self, id: i64, input: &FlightInput) -> DomainResult<Flight> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE flights SET route_id = ?, airplane_id = ?, departure_time = ?, arrival_time = ? WHERE id = ?",
        )
        .bind(input.route_id)
        .bind(input.airplane_id)
        .bind(format_datetime(input.departure_time))
        .bind(format_datetime(input.arrival_time))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("flight", id));
        }

        sqlx::query("DELETE FROM flight_crew WHERE flight_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        assign_crew(&mut tx, id, &input.crew_ids).await?;
        tx.commit().await?;

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM flights WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("flight", id));
        }

        Ok(())
    }

    async fn list(
        &self,
        filter: &FlightFilter,
        ordering: Option<&Ordering<FlightSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Flight>> {
        let (conditions, bindings) = filter_conditions(filter);
        let from = flight_from();

        let count_sql = format!("SELECT COUNT(*) FROM {from}{conditions}");
        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        for binding in &bindings {
            count_query = count_query.bind(binding);
        }
        let (count,) = count_query.fetch_one(&self.pool).await?;

        let order_by = ordering.map_or_else(
            || "f.departure_time ASC, f.id ASC".to_string(),
            |o| order_by_clause(o, sort_column, "f.id"),
        );
        let ids_sql = format!("SELECT f.id FROM {from}{conditions} ORDER BY {order_by} LIMIT ? OFFSET ?");
        let mut ids_query = sqlx::query_as::<_, (i64,)>(&ids_sql);
        for binding in &bindings {
            ids_query = ids_query.bind(binding);
        }
        let ids: Vec<i64> = ids_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect();

        let flights = load_flights(&self.pool, &ids).await?;
        Page::new(flights, to_u64(count, "count")?, page)
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: i64,
    departure_time: String,
    arrival_time: String,
    #[sqlx(flatten)]
    route: RouteRow,
    #[sqlx(flatten)]
    airplane: AirplaneRow,
}

#[derive(sqlx::FromRow)]
struct FlightCrewRow {
    flight_id: i64,
    #[sqlx(flatten)]
    crew: CrewRow,
}
