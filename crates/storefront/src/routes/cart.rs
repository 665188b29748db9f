//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation returns the freshly published cart panel fragment; an
//! `HX-Trigger: cart-updated` header lets the count badge refresh itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use millbrook_core::ItemId;

use crate::error::AppError;
use crate::render::CartView;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: i32,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart panel plus the transient "Added to cart" toast.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub cart: CartView,
    pub added_name: String,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Add one of an item to the cart (HTMX).
///
/// Returns the cart panel with a self-dismissing acknowledgment toast. The
/// toast's dismissal timer runs as a detached task tracked by diagnostics;
/// it is cosmetic and independent of cart state.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let id = ItemId::new(form.item_id);
    let entry = state
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    state
        .with_cart(|cart| cart.add_item(&entry))
        .map_err(|rejected| {
            tracing::warn!(%id, %rejected, "entry rejected at cart boundary");
            AppError::BadRequest(rejected.to_string())
        })?;

    spawn_toast_timer(&state);

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartAddedTemplate {
            cart: state.cart_view(),
            added_name: entry.name,
        },
    )
        .into_response())
}

/// Update a cart line's quantity (HTMX).
///
/// A quantity of zero or below removes the line. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> impl IntoResponse {
    let id = ItemId::new(form.item_id);
    state.with_cart(|cart| cart.update_quantity(id, form.quantity));

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPanelTemplate {
            cart: state.cart_view(),
        },
    )
}

/// Remove a line from the cart (HTMX). Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> impl IntoResponse {
    let id = ItemId::new(form.item_id);
    state.with_cart(|cart| cart.remove_item(id));

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPanelTemplate {
            cart: state.cart_view(),
        },
    )
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart_view().item_count,
    }
}

/// Schedule the toast's dismissal as a tracked, detached timer.
fn spawn_toast_timer(state: &AppState) {
    let diagnostics = state.diagnostics().clone();
    let duration = state.config().toast_duration;

    tokio::spawn(async move {
        let _timer = diagnostics.timer_guard(duration);
        tokio::time::sleep(duration).await;
        tracing::debug!("added-to-cart acknowledgment dismissed");
    });
}
