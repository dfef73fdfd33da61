//! Pipe parameter resolution, quantity and price derivation, and the
//! [`PricingEngine`] that turns form input into priced line items.
//!
//! Every pair of interchangeable inputs (SDR/PN, length/mass, unit/total
//! price) goes through [`PreferExplicitOverDerived`] first, then through the
//! resolvers in [`resolve`].

pub mod derivation;
mod engine;
pub mod resolve;
mod spec;

pub use engine::{DiscountChoice, FittingRequest, InvoiceRequest, PipeRequest, PricingEngine};
pub use resolve::{ResolvedPipeSpec, ResolvedPricing, ResolvedQuantity};
pub use spec::{
    PreferExplicitOverDerived, PressureSpec, PriceSpec, QuantitySpec, parse_field,
    parse_money_field,
};
