//! Axum extractors for request handling

mod client;
mod validated;

pub use client::ClientAddress;
pub use validated::ValidatedJson;
