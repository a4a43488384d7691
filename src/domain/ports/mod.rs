//! Port trait definitions (Hexagonal Architecture)
//!
//! One async repository trait per aggregate. The SQLite adapters implement
//! them; services only depend on these traits.

pub mod airplane_repository;
pub mod airplane_type_repository;
pub mod airport_repository;
pub mod crew_repository;
pub mod flight_repository;
pub mod order_repository;
pub mod route_repository;
pub mod user_repository;

pub use airplane_repository::AirplaneRepository;
pub use airplane_type_repository::AirplaneTypeRepository;
pub use airport_repository::AirportRepository;
pub use crew_repository::CrewRepository;
pub use flight_repository::FlightRepository;
pub use order_repository::OrderRepository;
pub use route_repository::RouteRepository;
pub use user_repository::{UserRecord, UserRepository};
