//! # Guichet API Server
//!
//! Axum-based HTTP API server for the Guichet ticketing system.
//!
//! ## Modules
//!
//! - [`session`]: Login and initial-admin bootstrap endpoints
//! - [`users`]: Profile and user management endpoints
//! - [`clients`] / [`demandeurs`]: Registry endpoints
//! - [`tickets`]: Ticket lifecycle endpoints
//! - [`lifecycle`]: The ticket state machine
//! - [`stats`]: Read-only statistics rollups
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: HTTP middleware (JWT auth)
//! - [`router`]: API route configuration

pub mod clients;
pub mod demandeurs;
pub mod dto;
pub mod lifecycle;
pub mod middleware;
pub mod router;
pub mod session;
pub mod stats;
pub mod tickets;
pub mod users;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// JWT configuration
    pub jwt_config: auth::JwtConfig,
}
