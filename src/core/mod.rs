//! Core invoice types, errors, configuration, numbering, and display rounding.
//!
//! Money is carried as [`rust_decimal::Decimal`]; physical quantities
//! (diameter, SDR, PN, length, mass) as `f64`.

mod builder;
mod config;
mod error;
mod numbering;
pub mod presentation;
mod types;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use numbering::*;
pub use types::*;
