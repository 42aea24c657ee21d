//! # HTTP Server Module
//!
//! Axum server exposing the uniform catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/uniforme` - List, create, update and delete uniforms

pub mod catalog_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use catalog_routes::{CatalogState, UNIFORM_PATH};
pub use config::HttpServerConfig;
pub use server::HttpServer;
