use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tables::DiscountSchedule;

/// A finalized invoice ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Sequential invoice number (unpadded).
    pub number: u64,
    /// Customer name as entered.
    pub customer_name: String,
    /// Issue date (network time with local fallback, see [`crate::clock`]).
    pub issue_date: NaiveDate,
    /// Free-text note printed below the item table.
    pub note: Option<String>,
    /// Line items in entry order.
    pub items: Vec<LineItem>,
    /// Discount applied to the subtotal.
    pub discount: DiscountMode,
    /// Value-added rate as a fraction (e.g. 0.10), if enabled.
    pub value_added_rate: Option<Decimal>,
    /// Computed totals.
    pub totals: Totals,
}

/// One priced entry on an invoice.
///
/// Items are never edited in place: an edit is a removal followed by a new
/// item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineItem {
    Pipe(PipeLine),
    Fitting(FittingLine),
}

impl LineItem {
    pub fn total_price(&self) -> Decimal {
        match self {
            Self::Pipe(p) => p.total_price,
            Self::Fitting(f) => f.total_price,
        }
    }

    pub fn unit_price(&self) -> Decimal {
        match self {
            Self::Pipe(p) => p.unit_price,
            Self::Fitting(f) => f.unit_price,
        }
    }

    pub fn as_pipe(&self) -> Option<&PipeLine> {
        match self {
            Self::Pipe(p) => Some(p),
            Self::Fitting(_) => None,
        }
    }

    pub fn as_fitting(&self) -> Option<&FittingLine> {
        match self {
            Self::Fitting(f) => Some(f),
            Self::Pipe(_) => None,
        }
    }
}

/// A priced pipe run. Prices are per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeLine {
    /// Polymer grade, e.g. "PE100".
    pub grade: String,
    /// Nominal pressure in bar.
    pub pn: f64,
    /// Standard dimension ratio.
    pub sdr: f64,
    /// Outside diameter in mm.
    pub diameter: f64,
    /// Length in meters.
    pub length: f64,
    /// Mass per meter in kg/m.
    pub mass_per_length: f64,
    /// Total mass in kg.
    pub total_mass: f64,
    /// Price per kg.
    pub unit_price: Decimal,
    /// Price for the whole run.
    pub total_price: Decimal,
}

/// A priced fitting purchase. Prices are per piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingLine {
    /// Fitting family, e.g. "Electrofusion".
    pub fitting_type: String,
    /// Product within the family, e.g. "Coupler".
    pub product: String,
    /// Size label as printed in the catalog ("110", "110x90").
    pub size: String,
    /// Pressure rating label from the catalog.
    pub pn: String,
    /// Number of pieces.
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// How the order discount is determined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum DiscountMode {
    /// No discount.
    #[default]
    None,
    /// Bracketed discount over the given schedule.
    Tiered(DiscountSchedule),
    /// Single scalar: a percentage when `<= 100`, an absolute amount above.
    Custom(Decimal),
}

/// Invoice totals. All amounts are kept at full precision; round with
/// [`crate::core::presentation`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all line totals.
    pub subtotal: Decimal,
    /// Discount amount (never above `subtotal`).
    pub discount: Decimal,
    /// `subtotal - discount`.
    pub net: Decimal,
    /// Value-added surcharge on `net` (zero when disabled).
    pub value_added: Decimal,
    /// `net + value_added`.
    pub grand_total: Decimal,
}

impl Totals {
    /// Totals for an empty or undiscounted order.
    pub fn undiscounted(subtotal: Decimal) -> Self {
        Self {
            subtotal,
            discount: Decimal::ZERO,
            net: subtotal,
            value_added: Decimal::ZERO,
            grand_total: subtotal,
        }
    }
}
