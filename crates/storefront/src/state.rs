//! Application state shared across handlers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::diagnostics::Diagnostics;
use crate::render::{CartRenderer, CartView};
use crate::services::payment::PaymentProcessor;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is the single owner of the
/// cart store for the process lifetime; handlers reach the cart through
/// [`Self::with_cart`], never through a global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    renderer: Arc<CartRenderer>,
    payments: PaymentProcessor,
    diagnostics: Arc<Diagnostics>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the catalog, the cart store, and the rendering adapter, and
    /// subscribes the adapter to the store so every mutation republishes the
    /// cart view.
    #[must_use]
    pub fn new(config: StorefrontConfig, diagnostics: Arc<Diagnostics>) -> Self {
        let renderer = Arc::new(CartRenderer::new(Arc::clone(&diagnostics)));

        let mut cart = CartStore::new();
        cart.subscribe(renderer.clone());

        let payments = PaymentProcessor::new(config.payment_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(),
                cart: Mutex::new(cart),
                renderer,
                payments,
                diagnostics,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Run `f` with exclusive access to the cart store.
    ///
    /// The lock is released before control returns, so the closure must not
    /// await; cart operations are synchronous by design.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        let mut cart = self
            .inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// The most recently rendered cart view.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        self.inner.renderer.current()
    }

    /// Get a reference to the mock payment processor.
    #[must_use]
    pub fn payments(&self) -> &PaymentProcessor {
        &self.inner.payments
    }

    /// Get a reference to the shared diagnostics counters.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.inner.diagnostics
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use millbrook_core::ItemId;

    fn test_state() -> AppState {
        AppState::new(
            StorefrontConfig::default(),
            Arc::new(Diagnostics::new()),
        )
    }

    #[test]
    fn test_cart_starts_empty() {
        let state = test_state();
        assert!(state.with_cart(|cart| cart.is_empty()));
        assert!(!state.cart_view().checkout_enabled);
    }

    #[test]
    fn test_mutation_updates_published_view() {
        let state = test_state();
        let entry = state.catalog().get(ItemId::new(1)).unwrap().clone();

        state
            .with_cart(|cart| cart.add_item(&entry))
            .unwrap();

        let view = state.cart_view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].name, "Classic Margherita");
        assert!(view.checkout_enabled);
        assert_eq!(state.diagnostics().render_passes(), 1);
    }
}
