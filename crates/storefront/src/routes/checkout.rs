//! Checkout route handlers.
//!
//! The checkout page reads the cart's contents and total to build an order
//! payload; submission runs the mock payment, shows the confirmation, and
//! clears the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::render::CartView;
use crate::services::checkout::{self, CheckoutRequest, format_pickup_time};
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub pickup_time: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order_number: String,
    pub pickup_time: String,
    pub email: String,
    pub transaction_id: String,
}

/// Display the checkout form.
///
/// An empty cart cannot check out; redirect back to the order builder.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    let cart = state.cart_view();
    if !cart.checkout_enabled {
        return Redirect::to("/order").into_response();
    }

    CheckoutTemplate { cart }.into_response()
}

/// Submit the order: validate, run the mock payment, confirm, clear.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let request = CheckoutRequest {
        name: form.name,
        email: form.email,
        phone: form.phone,
        pickup_time: form.pickup_time,
    };

    // Snapshot the cart before any await; the lock must not be held across
    // the simulated payment.
    let (lines, total) = state.with_cart(|cart| (cart.lines().to_vec(), cart.total()));

    let order = checkout::build_order(&request, lines, total)?;
    tracing::info!(order_number = %order.number, total = %order.total, "order placed");

    let receipt = state.payments().process(&order, state.diagnostics()).await;

    // The cart is cleared only after the (always-successful) payment, so a
    // validation failure leaves the order intact for another attempt.
    state.with_cart(|cart| cart.clear());

    Ok(ConfirmationTemplate {
        order_number: order.number,
        pickup_time: format_pickup_time(order.pickup_time),
        email: order.customer.email,
        transaction_id: receipt.transaction_id,
    }
    .into_response())
}
