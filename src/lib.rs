//! # pipebill
//!
//! Pricing engine for polyethylene pipe and fitting invoices: completes a
//! pipe's pressure class from its grade, converts between length, mass and
//! price through the weight table, and totals an order with tiered or custom
//! discounts and a value-added surcharge.
//!
//! All monetary values use [`rust_decimal::Decimal`]; physical quantities
//! are `f64`.
//!
//! ## Quick Start
//!
//! ```rust
//! use pipebill::core::*;
//! use pipebill::pricing::{PipeRequest, PricingEngine};
//! use pipebill::tables::*;
//! use rust_decimal_macros::dec;
//!
//! let tables = ReferenceTables {
//!     series: PipeSeriesTable::from_reader(",17,11\nPE100,10,16\n".as_bytes()).unwrap(),
//!     weights: WeightTable::from_reader(",17,11\n110,2.020,3.016\n".as_bytes()).unwrap(),
//!     discounts: DiscountSchedule::default(),
//!     fittings: FittingsCatalog::default(),
//! };
//! let engine = PricingEngine::new(tables, Config::default());
//!
//! let item = engine
//!     .price_pipe(&PipeRequest {
//!         grade: "PE100".into(),
//!         sdr: Some(17.0),
//!         diameter: 110.0,
//!         length: Some(100.0),
//!         unit_price: Some(dec!(50000)),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let pipe = item.as_pipe().unwrap();
//! assert_eq!(pipe.pn, 10.0);
//! assert_eq!(pipe.total_price.round_dp(2), dec!(10100000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Tables, pricing, discounts, numbering, invoice assembly |
//! | `net-time` | Issue date from the world time API (blocking HTTP) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod tables;

#[cfg(feature = "core")]
pub mod pricing;

#[cfg(feature = "core")]
pub mod discount;

#[cfg(feature = "core")]
pub mod clock;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
