//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /menu                   - Full menu grouped by category
//! GET  /order                  - Order builder (menu with add buttons + cart panel)
//!
//! # Cart (HTMX fragments)
//! POST /cart/add               - Add item (returns cart panel + toast, triggers cart-updated)
//! POST /cart/update            - Set line quantity (returns cart panel fragment)
//! POST /cart/remove            - Remove line (returns cart panel fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form (redirects to /order when cart empty)
//! POST /checkout               - Validate, run mock payment, show confirmation
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(home::home))
        .route("/menu", get(menu::menu))
        .route("/order", get(menu::order))
        // Cart fragments
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
}
