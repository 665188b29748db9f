//! Cart rendering adapter.
//!
//! Subscribes to [`CartStore`] notifications and rebuilds a display-ready
//! [`CartView`] wholesale after every mutation. The adapter owns formatting
//! and defensive display defaults; the store stays pure state.

use std::sync::{Arc, PoisonError, RwLock};

use rust_decimal::Decimal;

use crate::cart::{CartEvent, CartLine, CartObserver, CartStore};
use crate::diagnostics::Diagnostics;

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    /// Cart non-empty. Drives the checkout control's enabled state.
    pub checkout_enabled: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
            checkout_enabled: false,
        }
    }

    /// Build a view from the current cart state.
    ///
    /// A line whose quantity is somehow zero (impossible through the store
    /// API, but fields are public) is skipped with a diagnostic rather than
    /// aborting the rest of the render.
    #[must_use]
    pub fn from_cart(cart: &CartStore, diagnostics: &Diagnostics) -> Self {
        let items: Vec<CartItemView> = cart
            .lines()
            .iter()
            .filter_map(|line| item_view(line, diagnostics))
            .collect();

        Self {
            items,
            total: format_amount(cart.total()),
            item_count: cart.item_count(),
            checkout_enabled: !cart.is_empty(),
        }
    }
}

/// Format a decimal amount as a price string (e.g., `$12.99`).
fn format_amount(amount: Decimal) -> String {
    format!("${amount:.2}")
}

fn item_view(line: &CartLine, diagnostics: &Diagnostics) -> Option<CartItemView> {
    if line.quantity == 0 {
        tracing::warn!(id = %line.id, "skipping cart line with zero quantity");
        diagnostics.record_skipped_line();
        return None;
    }

    Some(CartItemView {
        id: line.id.as_i32(),
        name: line.name.clone(),
        price: format_amount(line.unit_price.amount()),
        quantity: line.quantity,
        subtotal: format_amount(line.subtotal()),
    })
}

/// Observer that keeps the latest rendered [`CartView`] published for the
/// route handlers.
///
/// The slot starts empty; reading it before the first mutation falls back to
/// an empty view and records the miss, rather than treating it as an error.
pub struct CartRenderer {
    view: RwLock<Option<CartView>>,
    diagnostics: Arc<Diagnostics>,
}

impl CartRenderer {
    #[must_use]
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self {
            view: RwLock::new(None),
            diagnostics,
        }
    }

    /// The most recently published view, or an empty view if nothing has
    /// been rendered yet.
    #[must_use]
    pub fn current(&self) -> CartView {
        let slot = self
            .view
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        slot.clone().unwrap_or_else(|| {
            tracing::debug!("no cart view published yet, falling back to empty");
            self.diagnostics.record_missing_view();
            CartView::empty()
        })
    }
}

impl CartObserver for CartRenderer {
    fn cart_changed(&self, cart: &CartStore, event: &CartEvent) {
        let view = CartView::from_cart(cart, &self.diagnostics);
        self.diagnostics.record_render(view.items.len());
        tracing::debug!(?event, lines = view.items.len(), "cart view rebuilt");

        *self.view.write().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use millbrook_core::{Category, ItemId, Price};

    use crate::catalog::CatalogEntry;

    fn entry(id: i32, name: &str, cents: i64) -> CatalogEntry {
        CatalogEntry {
            id: ItemId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Price::from_cents(cents).unwrap(),
            image: None,
            category: Category::Sides,
        }
    }

    #[test]
    fn test_empty_view_disables_checkout() {
        let view = CartView::empty();
        assert!(!view.checkout_enabled);
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_from_cart_formats_lines() {
        let diagnostics = Diagnostics::new();
        let mut cart = CartStore::new();
        cart.add_item(&entry(1, "Classic Margherita", 1299)).unwrap();
        cart.add_item(&entry(1, "Classic Margherita", 1299)).unwrap();
        cart.add_item(&entry(201, "Soda", 249)).unwrap();

        let view = CartView::from_cart(&cart, &diagnostics);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].price, "$12.99");
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].subtotal, "$25.98");
        assert_eq!(view.total, "$28.47");
        assert_eq!(view.item_count, 3);
        assert!(view.checkout_enabled);
    }

    #[test]
    fn test_degenerate_line_skipped_not_fatal() {
        use crate::cart::CartLine;

        let diagnostics = Diagnostics::new();
        let good = CartLine {
            id: ItemId::new(1),
            name: "Classic Margherita".to_string(),
            unit_price: Price::from_cents(1299).unwrap(),
            quantity: 2,
        };
        let degenerate = CartLine {
            quantity: 0,
            ..good.clone()
        };

        assert!(item_view(&good, &diagnostics).is_some());
        assert!(item_view(&degenerate, &diagnostics).is_none());
    }

    #[test]
    fn test_renderer_publishes_on_mutation() {
        let diagnostics = Diagnostics::new();
        let renderer = Arc::new(CartRenderer::new(Arc::new(diagnostics)));

        let mut cart = CartStore::new();
        cart.subscribe(renderer.clone());

        // Nothing published yet: fall back to empty with a diagnostic.
        assert_eq!(renderer.current(), CartView::empty());

        cart.add_item(&entry(104, "Buffalo Wings", 999)).unwrap();
        let view = renderer.current();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total, "$9.99");

        cart.clear();
        assert_eq!(renderer.current(), CartView::empty());
    }
}
