//! Integration tests for MillBrook Pizza.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p millbrook-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart store semantics exercised through the library
//! - `storefront_routes` - Full router driven with `tower::ServiceExt`

use std::sync::Arc;
use std::time::Duration;

use millbrook_storefront::config::StorefrontConfig;
use millbrook_storefront::diagnostics::Diagnostics;
use millbrook_storefront::state::AppState;

/// Build an application state with a near-instant mock payment, so route
/// tests do not sit through the simulated processing delay.
#[must_use]
pub fn test_state() -> AppState {
    let config = StorefrontConfig {
        payment_delay: Duration::from_millis(1),
        toast_duration: Duration::from_millis(1),
        ..StorefrontConfig::default()
    };
    AppState::new(config, Arc::new(Diagnostics::new()))
}
