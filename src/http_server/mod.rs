//! # HTTP Server Module
//!
//! Axum server exposing the student records API.
//!
//! # Endpoints
//!
//! - `/` - Greeting
//! - `/health`, `/health/store` - Liveness and store readiness
//! - `/students/*` - Student CRUD

pub mod config;
pub mod observability_routes;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
