//! Adapters for the outside world: SQLite persistence and the HTTP API.

pub mod http;
pub mod sqlite;
