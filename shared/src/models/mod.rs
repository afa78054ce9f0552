//! Data models
//!
//! Shared between the quote engine, its HTTP API and any frontend.
//! Money values travel as `f64` rounded to cents; arithmetic on them
//! happens in `rust_decimal` inside the engine.

pub mod catalog;
pub mod order_line;
pub mod pricing;
pub mod tariff;

// Re-exports
pub use catalog::*;
pub use order_line::*;
pub use pricing::*;
pub use tariff::*;
