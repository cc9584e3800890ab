//! # mood-api
//!
//! HTTP surface of the mood map, built with Axum.
//!
//! Routes:
//! - `POST /api/mood` submit a mood
//! - `GET /api/stats`, `GET /api/stats/reasons` read-side aggregates
//! - `GET|POST /api/migrate` import the fallback file into the primary store
//! - `GET /health`, `GET /health/ready` probes

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
