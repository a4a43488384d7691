//! Service layer: validation and cross-aggregate rules over the repository ports.

pub mod crew_service;
pub mod fleet_service;
pub mod flight_service;
pub mod network_service;
pub mod order_service;
pub mod user_service;

pub use crew_service::CrewService;
pub use fleet_service::FleetService;
pub use flight_service::FlightService;
pub use network_service::NetworkService;
pub use order_service::OrderService;
pub use user_service::UserService;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::adapters::sqlite::{
    SqliteAirplaneRepository, SqliteAirplaneTypeRepository, SqliteAirportRepository,
    SqliteCrewRepository, SqliteFlightRepository, SqliteOrderRepository, SqliteRouteRepository,
    SqliteUserRepository,
};
use crate::infrastructure::MediaStore;

/// Every service, wired to one SQLite pool.
#[derive(Clone)]
pub struct Services {
    pub fleet: Arc<FleetService>,
    pub network: Arc<NetworkService>,
    pub crew: Arc<CrewService>,
    pub flights: Arc<FlightService>,
    pub orders: Arc<OrderService>,
    pub users: Arc<UserService>,
}

impl Services {
    pub fn sqlite(pool: &SqlitePool, media: MediaStore, max_image_bytes: u64) -> Self {
        let airplane_types = Arc::new(SqliteAirplaneTypeRepository::new(pool.clone()));
        let airplanes = Arc::new(SqliteAirplaneRepository::new(pool.clone()));
        let airports = Arc::new(SqliteAirportRepository::new(pool.clone()));
        let routes = Arc::new(SqliteRouteRepository::new(pool.clone()));
        let crew = Arc::new(SqliteCrewRepository::new(pool.clone()));
        let flights = Arc::new(SqliteFlightRepository::new(pool.clone()));
        let orders = Arc::new(SqliteOrderRepository::new(pool.clone()));
        let users = Arc::new(SqliteUserRepository::new(pool.clone()));

        Self {
            fleet: Arc::new(FleetService::new(
                airplane_types,
                airplanes.clone(),
                media,
                max_image_bytes,
            )),
            network: Arc::new(NetworkService::new(airports, routes.clone())),
            crew: Arc::new(CrewService::new(crew.clone())),
            flights: Arc::new(FlightService::new(flights.clone(), routes, airplanes, crew)),
            orders: Arc::new(OrderService::new(orders, flights)),
            users: Arc::new(UserService::new(users)),
        }
    }
}
