//! Pure arithmetic between length, mass and price.
//!
//! Every function looks mass per meter up again rather than taking it as an
//! argument, so a caller can never pair a mass with the wrong pipe.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::{PricingError, Result};
use crate::tables::WeightTable;

fn check_quantity(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::Input(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}

fn positive_mass_per_length(weights: &WeightTable, diameter: f64, sdr: f64) -> Result<f64> {
    let mpl = weights.mass_per_length(diameter, sdr)?;
    if mpl <= 0.0 {
        return Err(PricingError::Input(format!(
            "cannot derive a length: weight for diameter {diameter} and SDR {sdr} is {mpl}"
        )));
    }
    Ok(mpl)
}

/// Convert a physical quantity into the money domain.
pub fn quantity_to_decimal(quantity: f64) -> Result<Decimal> {
    Decimal::from_f64(quantity)
        .ok_or_else(|| PricingError::Input(format!("quantity {quantity} is out of range")))
}

/// kg of `length` meters of pipe.
pub fn total_mass(weights: &WeightTable, length: f64, diameter: f64, sdr: f64) -> Result<f64> {
    let length = check_quantity("length", length)?;
    Ok(length * weights.mass_per_length(diameter, sdr)?)
}

/// Meters of pipe weighing `total_mass` kg.
pub fn length_from_mass(
    weights: &WeightTable,
    total_mass: f64,
    diameter: f64,
    sdr: f64,
) -> Result<f64> {
    let total_mass = check_quantity("total mass", total_mass)?;
    Ok(total_mass / positive_mass_per_length(weights, diameter, sdr)?)
}

/// Total price of `length` meters at `unit_price` per kg.
pub fn total_price(
    weights: &WeightTable,
    length: f64,
    diameter: f64,
    sdr: f64,
    unit_price: Decimal,
) -> Result<Decimal> {
    let mass = total_mass(weights, length, diameter, sdr)?;
    quantity_to_decimal(mass)?
        .checked_mul(unit_price)
        .ok_or_else(PricingError::out_of_range)
}

/// Price per kg implied by a total price for `length` meters.
pub fn unit_price_from_total(
    weights: &WeightTable,
    total_price: Decimal,
    length: f64,
    diameter: f64,
    sdr: f64,
) -> Result<Decimal> {
    let mass = total_mass(weights, length, diameter, sdr)?;
    if mass <= 0.0 {
        return Err(PricingError::Input(
            "cannot derive a price per kg from a zero mass".into(),
        ));
    }
    total_price
        .checked_div(quantity_to_decimal(mass)?)
        .ok_or_else(PricingError::out_of_range)
}
