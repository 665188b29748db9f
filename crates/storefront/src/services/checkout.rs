//! Order payload construction.
//!
//! Turns the checkout form plus a snapshot of the cart into an [`Order`]:
//! random six-digit order number, validated customer details, and the pickup
//! time formatted for the confirmation screen. Nothing here is persisted;
//! the order exists only for the confirmation page and the payment mock.

use chrono::{NaiveTime, Timelike};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CartLine;

/// Checkout submission failures. All map to a client error, never a 500.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The order builder was reached with nothing in the cart.
    #[error("Your cart is empty. Please add items to your order.")]
    EmptyCart,

    /// A required form field was blank.
    #[error("Please fill in all required fields ({0} is missing).")]
    MissingField(&'static str),

    /// The pickup time did not parse as `HH:MM`.
    #[error("Invalid pickup time: {0}")]
    InvalidPickupTime(String),
}

/// Customer contact details from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A confirmed order payload.
#[derive(Debug, Clone)]
pub struct Order {
    /// Six-digit zero-padded order number.
    pub number: String,
    pub customer: CustomerInfo,
    pub pickup_time: NaiveTime,
    /// Snapshot of the cart lines at submission time.
    pub lines: Vec<CartLine>,
    /// Snapshot of the cart total at submission time.
    pub total: Decimal,
}

/// Raw checkout form fields, before validation.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Pickup time as `HH:MM` (24-hour), as submitted by a time input.
    pub pickup_time: String,
}

/// Build an order from the submitted form and the current cart contents.
///
/// # Errors
///
/// Returns [`CheckoutError`] if the cart is empty, a required field is
/// blank, or the pickup time is malformed. The cart is not consumed on
/// failure; the caller clears it only after payment succeeds.
pub fn build_order(
    request: &CheckoutRequest,
    lines: Vec<CartLine>,
    total: Decimal,
) -> Result<Order, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let name = required(&request.name, "name")?;
    let email = required(&request.email, "email")?;
    let pickup_time = parse_pickup_time(&request.pickup_time)?;

    let phone = request
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from);

    Ok(Order {
        number: generate_order_number(),
        customer: CustomerInfo { name, email, phone },
        pickup_time,
        lines,
        total,
    })
}

/// Format a pickup time as 12-hour with AM/PM (e.g., `2:05 PM`).
#[must_use]
pub fn format_pickup_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{:02} {meridiem}", time.minute())
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn parse_pickup_time(raw: &str) -> Result<NaiveTime, CheckoutError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField("pickup time"));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| CheckoutError::InvalidPickupTime(trimmed.to_string()))
}

/// Random six-digit order number, zero-padded.
fn generate_order_number() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use millbrook_core::{ItemId, Price};
    use rust_decimal_macros::dec;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            pickup_time: "18:30".to_string(),
        }
    }

    fn lines() -> Vec<CartLine> {
        vec![CartLine {
            id: ItemId::new(2),
            name: "Pepperoni".to_string(),
            unit_price: Price::from_cents(1499).unwrap(),
            quantity: 2,
        }]
    }

    #[test]
    fn test_build_order_snapshot() {
        let order = build_order(&request(), lines(), dec!(29.98)).unwrap();

        assert_eq!(order.customer.name, "Ada Lovelace");
        assert_eq!(order.customer.phone.as_deref(), Some("555-0100"));
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total, dec!(29.98));
        assert_eq!(order.pickup_time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn test_order_number_is_six_digits() {
        for _ in 0..50 {
            let order = build_order(&request(), lines(), dec!(29.98)).unwrap();
            assert_eq!(order.number.len(), 6);
            assert!(order.number.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = build_order(&request(), Vec::new(), Decimal::ZERO).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut blank_name = request();
        blank_name.name = "  ".to_string();
        assert!(matches!(
            build_order(&blank_name, lines(), dec!(1)).unwrap_err(),
            CheckoutError::MissingField("name")
        ));

        let mut blank_email = request();
        blank_email.email = String::new();
        assert!(matches!(
            build_order(&blank_email, lines(), dec!(1)).unwrap_err(),
            CheckoutError::MissingField("email")
        ));

        let mut blank_time = request();
        blank_time.pickup_time = String::new();
        assert!(matches!(
            build_order(&blank_time, lines(), dec!(1)).unwrap_err(),
            CheckoutError::MissingField("pickup time")
        ));
    }

    #[test]
    fn test_blank_phone_becomes_none() {
        let mut no_phone = request();
        no_phone.phone = Some("   ".to_string());
        let order = build_order(&no_phone, lines(), dec!(1)).unwrap();
        assert_eq!(order.customer.phone, None);
    }

    #[test]
    fn test_bad_pickup_time_rejected() {
        let mut bad = request();
        bad.pickup_time = "half past six".to_string();
        assert!(matches!(
            build_order(&bad, lines(), dec!(1)).unwrap_err(),
            CheckoutError::InvalidPickupTime(_)
        ));
    }

    #[test]
    fn test_format_pickup_time() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(format_pickup_time(t(18, 30)), "6:30 PM");
        assert_eq!(format_pickup_time(t(9, 5)), "9:05 AM");
        assert_eq!(format_pickup_time(t(12, 0)), "12:00 PM");
        assert_eq!(format_pickup_time(t(0, 15)), "12:15 AM");
    }
}
