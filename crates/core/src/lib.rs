//! MillBrook Core - Shared types library.
//!
//! This crate provides common types used across all MillBrook Pizza
//! components:
//! - `storefront` - Public-facing ordering site
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
