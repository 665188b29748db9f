//! Business logic services.
//!
//! - [`checkout`] - Order payload construction and form validation
//! - [`payment`] - Mock payment processing

pub mod checkout;
pub mod payment;
