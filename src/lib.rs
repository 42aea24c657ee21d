//! uniform_catalog - REST endpoint for a school-uniform catalog
//!
//! A single resource, `/api/uniforme`, validated and persisted through a
//! table-oriented storage client (the managed datastore's REST interface, or
//! in-memory tables for development).

pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod storage;
