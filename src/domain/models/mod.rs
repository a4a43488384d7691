//! Domain models for the airport booking API.

pub mod config;
pub mod crew;
pub mod fleet;
pub mod flight;
pub mod network;
pub mod order;
pub mod query;
pub mod time;
pub mod user;
pub mod validation;

pub use config::{
    Config, DatabaseConfig, LoggingConfig, MediaConfig, PaginationConfig, ServerConfig,
};
pub use crew::{Crew, CrewInput};
pub use fleet::{slugify, Airplane, AirplaneInput, AirplaneType, AirplaneTypeInput};
pub use flight::{DayWindow, Flight, FlightFilter, FlightFilterParams, FlightInput, Seat};
pub use network::{fold_case, Airport, AirportConnections, AirportInput, Route, RouteFilter, RouteInput};
pub use order::{first_duplicate_seat, Order, Ticket, TicketRequest};
pub use query::{
    AirplaneSortField, FlightSortField, Ordering, Page, PageRequest, SortField, SortTerm,
};
pub use user::{normalize_email, NewUser, User, UserUpdate};
