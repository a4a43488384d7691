//! Infrastructure layer module
//!
//! Configuration loading, logging setup, credential hashing and media file
//! storage. Nothing here depends on the HTTP layer.

pub mod config;
pub mod credentials;
pub mod logging;
pub mod media;

pub use media::MediaStore;
