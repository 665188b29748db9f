//! Cart state management.
//!
//! The cart is the authoritative in-memory representation of the customer's
//! current order. This module is pure state: no templates, no HTTP, no
//! display concerns. Rendering hangs off the [`CartObserver`] trait - after
//! every mutation the store notifies its observers, and the rendering
//! adapter (see [`crate::render`]) rebuilds its view from scratch.
//!
//! # Invariants
//!
//! - At most one line per item id; insertion order is preserved.
//! - A line with quantity zero never exists; setting a quantity to zero or
//!   below removes the line instead.
//! - Subtotals and the cart total are always derived from unit price and
//!   quantity, never stored, so they cannot drift.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use millbrook_core::{ItemId, Price};

use crate::catalog::CatalogEntry;

/// Placeholder used when a catalog entry arrives without a display name.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Reason an entry was rejected at the cart boundary.
///
/// The store validates entries instead of silently coercing bad fields;
/// callers decide whether a rejection is user-visible.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryRejected {
    /// Prices below zero never come from the catalog and would corrupt the
    /// total.
    #[error("entry {id} has a negative price")]
    NegativePrice { id: ItemId },
}

/// A state-change notification emitted after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { id: ItemId },
    ItemRemoved { id: ItemId },
    QuantityChanged { id: ItemId, quantity: u32 },
    Cleared,
}

/// Observer notified after every cart mutation.
///
/// Observers receive the whole store so they can rebuild wholesale; there is
/// no incremental diffing.
pub trait CartObserver: Send + Sync {
    fn cart_changed(&self, cart: &CartStore, event: &CartEvent);
}

/// One catalog entry's representation within the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Price,
    /// Always >= 1 for lines constructed through the store API.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity. Derived on demand, never cached.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }
}

/// The in-memory cart: an ordered list of lines keyed by item id.
///
/// Constructed once by the application state and passed by reference to the
/// routes and the checkout flow; there is no ambient global.
#[derive(Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    observers: Vec<Arc<dyn CartObserver>>,
}

impl CartStore {
    /// Create an empty cart with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in subscription order,
    /// synchronously, after each mutation completes.
    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Add one of `entry` to the cart.
    ///
    /// If a line with the same id already exists its quantity is incremented
    /// by one, saturating at `u32::MAX`; otherwise a new line with quantity
    /// one is appended. A blank name is substituted with
    /// [`UNKNOWN_ITEM_NAME`] rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EntryRejected`] if the entry fails boundary validation; the
    /// cart is left unchanged and observers are not notified.
    pub fn add_item(&mut self, entry: &CatalogEntry) -> Result<(), EntryRejected> {
        let validated = validate_entry(entry)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == validated.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                id: validated.id,
                name: validated.name,
                unit_price: validated.unit_price,
                quantity: 1,
            });
        }

        self.notify(CartEvent::ItemAdded { id: validated.id });
        Ok(())
    }

    /// Remove the line matching `id`, if present.
    ///
    /// Returns whether a line was removed. An absent id is a no-op, not an
    /// error, and observers are not notified for it.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        let removed = self.lines.len() != before;

        if removed {
            self.notify(CartEvent::ItemRemoved { id });
        }
        removed
    }

    /// Set the quantity of the line matching `id`.
    ///
    /// A target of zero or below behaves exactly like [`Self::remove_item`].
    /// No upper bound is enforced. Returns whether the cart changed; an
    /// unknown id is a no-op.
    pub fn update_quantity(&mut self, id: ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return false;
        };

        line.quantity = quantity;
        self.notify(CartEvent::QuantityChanged { id, quantity });
        true
    }

    /// Reset the cart to empty.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.notify(CartEvent::Cleared);
    }

    /// Sum of all line subtotals. Pure derived computation.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines, for the cart count badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn notify(&self, event: CartEvent) {
        for observer in &self.observers {
            observer.cart_changed(self, &event);
        }
    }
}

/// An entry that has passed boundary validation.
struct ValidatedEntry {
    id: ItemId,
    name: String,
    unit_price: Price,
}

/// Validate a catalog entry before it may enter the cart.
///
/// A blank name gets the placeholder (display concern, not a data error);
/// anything that would corrupt totals is rejected with a typed reason.
fn validate_entry(entry: &CatalogEntry) -> Result<ValidatedEntry, EntryRejected> {
    if entry.price.amount().is_sign_negative() && !entry.price.amount().is_zero() {
        return Err(EntryRejected::NegativePrice { id: entry.id });
    }

    let name = if entry.name.trim().is_empty() {
        tracing::warn!(id = %entry.id, "catalog entry has no name, using placeholder");
        UNKNOWN_ITEM_NAME.to_string()
    } else {
        entry.name.clone()
    };

    Ok(ValidatedEntry {
        id: entry.id,
        name,
        unit_price: entry.price,
    })
}
