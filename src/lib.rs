//! vitalis - liveness API server.
//!
//! Serves `GET /health` behind a configurable CORS policy. The binary in
//! `main.rs` wires configuration, logging and the CLI around [`server`].

pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
