use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::derivation::{length_from_mass, total_mass};
use super::spec::{PressureSpec, PriceSpec, QuantitySpec};
use crate::core::{PricingError, Result};
use crate::tables::{PipeSeriesTable, WeightTable};

/// A pipe fully identified against the reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPipeSpec {
    pub grade: String,
    pub pn: f64,
    pub sdr: f64,
    pub diameter: f64,
    pub mass_per_length: f64,
}

/// Length and mass of a pipe line, one of them derived from the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuantity {
    pub length: f64,
    pub total_mass: f64,
}

/// Unit and total price of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPricing {
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

fn check_key(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::Input(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(value)
}

fn check_money(field: &str, value: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::Input(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(value)
}

/// Complete (grade, PN, SDR, diameter) from whichever pressure attribute was
/// supplied, and look up mass per meter.
pub fn resolve_pipe_spec(
    series: &PipeSeriesTable,
    weights: &WeightTable,
    grade: &str,
    pressure: PressureSpec,
    diameter: f64,
) -> Result<ResolvedPipeSpec> {
    let grade = grade.trim();
    if grade.is_empty() {
        return Err(PricingError::Input("Please select a pipe grade".into()));
    }
    let diameter = check_key("diameter", diameter)?;

    let (sdr, pn) = match pressure {
        PressureSpec::Sdr(sdr) => {
            let sdr = check_key("SDR", sdr)?;
            (sdr, series.pn_for_grade_and_sdr(grade, sdr)?)
        }
        PressureSpec::Pn(pn) => {
            let pn = check_key("PN", pn)?;
            (series.sdr_for_grade_and_pn(grade, pn)?, pn)
        }
        PressureSpec::SdrWithPn { sdr, pn } => (check_key("SDR", sdr)?, check_key("PN", pn)?),
    };
    let mass_per_length = weights.mass_per_length(diameter, sdr)?;
    trace!(grade, pn, sdr, diameter, mass_per_length, "resolved pipe spec");

    Ok(ResolvedPipeSpec {
        grade: grade.to_string(),
        pn,
        sdr,
        diameter,
        mass_per_length,
    })
}

/// Complete (length, total mass) from whichever was supplied.
pub fn resolve_quantity(
    weights: &WeightTable,
    quantity: QuantitySpec,
    diameter: f64,
    sdr: f64,
) -> Result<ResolvedQuantity> {
    match quantity {
        QuantitySpec::Length(length) => Ok(ResolvedQuantity {
            length,
            total_mass: total_mass(weights, length, diameter, sdr)?,
        }),
        QuantitySpec::Mass(mass) => Ok(ResolvedQuantity {
            length: length_from_mass(weights, mass, diameter, sdr)?,
            total_mass: mass,
        }),
    }
}

/// Complete (unit price, total price) against a quantity equivalent: kg for
/// pipe, pieces for fittings.
pub fn resolve_pricing(price: PriceSpec, quantity_equivalent: Decimal) -> Result<ResolvedPricing> {
    let resolved = match price {
        PriceSpec::UnitPrice(unit) => {
            let unit = check_money("unit price", unit)?;
            ResolvedPricing {
                unit_price: unit,
                total_price: unit
                    .checked_mul(quantity_equivalent)
                    .ok_or_else(PricingError::out_of_range)?,
            }
        }
        PriceSpec::TotalPrice(total) => {
            let total = check_money("total price", total)?;
            if quantity_equivalent <= Decimal::ZERO {
                return Err(PricingError::Input(
                    "cannot derive a unit price from a zero quantity".into(),
                ));
            }
            ResolvedPricing {
                unit_price: total
                    .checked_div(quantity_equivalent)
                    .ok_or_else(PricingError::out_of_range)?,
                total_price: total,
            }
        }
        PriceSpec::UnitAndTotal { unit, total } => ResolvedPricing {
            unit_price: check_money("unit price", unit)?,
            total_price: check_money("total price", total)?,
        },
    };
    Ok(resolved)
}
