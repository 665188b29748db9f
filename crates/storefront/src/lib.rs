//! MillBrook Pizza Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the complete application router, including health checks.
///
/// Shared between `main` and the integration test suite so both exercise
/// the same routing table.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. There are no external
/// dependencies to probe.
async fn health() -> &'static str {
    "ok"
}
