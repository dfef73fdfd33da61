//! Display rounding.
//!
//! Computed values are stored at full precision. These helpers round only
//! at the output boundary: lengths to 2 decimals, masses to 3, money to
//! whole currency units. Rounding is half away from zero, never truncation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::types::LineItem;

/// Decimal places for a displayed pipe length.
pub const LENGTH_DP: u32 = 2;
/// Decimal places for a length derived from an entered mass.
pub const DERIVED_LENGTH_DP: u32 = 3;
/// Decimal places for kg/m and total kg.
pub const MASS_DP: u32 = 3;

fn round_f64(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

pub fn round_length(length: f64) -> f64 {
    round_f64(length, LENGTH_DP)
}

/// Length echoed back into the form after the user typed a mass.
pub fn round_derived_length(length: f64) -> f64 {
    round_f64(length, DERIVED_LENGTH_DP)
}

pub fn round_mass(mass: f64) -> f64 {
    round_f64(mass, MASS_DP)
}

/// Whole currency units.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// A line item rounded for display. Text shaping and digit localization are
/// left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLine {
    /// 1-based row number.
    pub position: usize,
    pub description: String,
    /// Meters for pipe, pieces for fittings.
    pub quantity: f64,
    pub mass_per_length: Option<f64>,
    pub total_mass: Option<f64>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl DisplayLine {
    pub fn from_item(position: usize, item: &LineItem) -> Self {
        match item {
            LineItem::Pipe(p) => Self {
                position,
                description: format!("{} SDR {} Ø{}", p.grade, p.sdr, p.diameter),
                quantity: round_length(p.length),
                mass_per_length: Some(round_mass(p.mass_per_length)),
                total_mass: Some(round_mass(p.total_mass)),
                unit_price: round_money(p.unit_price),
                total_price: round_money(p.total_price),
            },
            LineItem::Fitting(f) => Self {
                position,
                description: format!("{} {} {}", f.fitting_type, f.product, f.size),
                quantity: f64::from(f.quantity),
                mass_per_length: None,
                total_mass: None,
                unit_price: round_money(f.unit_price),
                total_price: round_money(f.total_price),
            },
        }
    }
}

/// Rows for the item table, numbered from 1.
pub fn display_lines(items: &[LineItem]) -> Vec<DisplayLine> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| DisplayLine::from_item(i + 1, item))
        .collect()
}
