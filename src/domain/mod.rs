//! Domain layer for the airport booking API
//!
//! This module contains the booking models, their validation rules and the
//! repository ports the adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
