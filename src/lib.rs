//! hello-db - flight schedule web service
//!
//! Serves an HTML listing of flights to planets and two maintenance endpoints
//! (shift flight dates, delete a planet) over a pooled PostgreSQL connection.

pub mod actions;
pub mod config;
pub mod db;
pub mod error;
pub mod flights;
pub mod flights_repo;
pub mod log_format;
pub mod planets;
pub mod planets_repo;
pub mod schema;
pub mod web;

pub use config::{DatabaseConfig, PoolConfig};
pub use db::{PgPool, create_pool, run_migrations};
pub use error::ApiError;
pub use web::{AppState, app, start_web_server};
