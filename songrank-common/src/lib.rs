//! # SongRank Common Library
//!
//! Shared code for the SongRank workspace:
//! - Error type and result alias
//! - Bootstrap configuration loading (TOML + environment + defaults)
//! - Database initialization, schema and record models
//! - Retry helper for SQLite lock contention

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
