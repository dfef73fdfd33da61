use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{PricingError, Result};

/// Which pressure attribute the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureSpec {
    /// SDR given; PN is looked up.
    Sdr(f64),
    /// PN given; SDR is looked up.
    Pn(f64),
    /// Both given. SDR drives every lookup and PN is carried through as
    /// entered, without a consistency check.
    SdrWithPn { sdr: f64, pn: f64 },
}

/// Which quantity attribute the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySpec {
    /// Length in meters; mass is derived.
    Length(f64),
    /// Total mass in kg; length is derived.
    Mass(f64),
}

/// Which price attribute the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSpec {
    /// Price per unit (kg or piece); total is derived.
    UnitPrice(Decimal),
    /// Total price; unit price is derived.
    TotalPrice(Decimal),
    /// Both given. The total is kept exactly as entered and the unit price
    /// is carried through, without a consistency check.
    UnitAndTotal { unit: Decimal, total: Decimal },
}

impl PriceSpec {
    /// The total price, when the caller supplied one.
    pub fn explicit_total(&self) -> Option<Decimal> {
        match self {
            Self::TotalPrice(total) | Self::UnitAndTotal { total, .. } => Some(*total),
            Self::UnitPrice(_) => None,
        }
    }
}

/// Precedence applied when a form supplies both members of a pair.
///
/// The form lets users fill either field of each pair and echoes a derived
/// value into the other, so both are usually present by the time an item is
/// added. The rules are:
///
/// - SDR over PN: SDR drives the lookups; an entered PN is kept verbatim even
///   if it disagrees with the table.
/// - Length over mass: mass is recomputed from length and an entered mass is
///   discarded.
/// - Total price over unit price: the entered total is kept exactly, so the
///   printed total matches what the user saw; an entered unit price is kept
///   as is, otherwise it is derived from the total.
///
/// These are not validation steps. Replacing them with consistency checks
/// would change the priced amounts of existing workflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferExplicitOverDerived;

impl PreferExplicitOverDerived {
    pub fn pressure(sdr: Option<f64>, pn: Option<f64>) -> Result<PressureSpec> {
        match (sdr, pn) {
            (Some(sdr), Some(pn)) => Ok(PressureSpec::SdrWithPn { sdr, pn }),
            (Some(sdr), None) => Ok(PressureSpec::Sdr(sdr)),
            (None, Some(pn)) => Ok(PressureSpec::Pn(pn)),
            (None, None) => Err(PricingError::Input("Please provide either SDR or PN".into())),
        }
    }

    pub fn quantity(length: Option<f64>, mass: Option<f64>) -> Result<QuantitySpec> {
        match (length, mass) {
            (Some(length), _) => Ok(QuantitySpec::Length(length)),
            (None, Some(mass)) => Ok(QuantitySpec::Mass(mass)),
            (None, None) => Err(PricingError::Input(
                "Please provide either Length or Total Mass".into(),
            )),
        }
    }

    pub fn price(unit: Option<Decimal>, total: Option<Decimal>) -> Result<PriceSpec> {
        match (unit, total) {
            (Some(unit), Some(total)) => Ok(PriceSpec::UnitAndTotal { unit, total }),
            (None, Some(total)) => Ok(PriceSpec::TotalPrice(total)),
            (Some(unit), None) => Ok(PriceSpec::UnitPrice(unit)),
            (None, None) => Err(PricingError::Input(
                "Please provide either Price per kg or Total Price".into(),
            )),
        }
    }
}

/// Parse a numeric form field. Blank text means "not supplied".
pub fn parse_field(field: &str, text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.replace(',', "").parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(PricingError::Input(format!("invalid {field}: {text:?}"))),
    }
}

/// Parse a money form field (thousands separators allowed). Blank text means
/// "not supplied".
pub fn parse_money_field(field: &str, text: &str) -> Result<Option<Decimal>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.replace(',', "")
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| PricingError::Input(format!("invalid {field}: {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sdr_wins_over_pn() {
        assert_eq!(
            PreferExplicitOverDerived::pressure(Some(17.0), Some(16.0)).unwrap(),
            PressureSpec::SdrWithPn { sdr: 17.0, pn: 16.0 }
        );
        assert_eq!(
            PreferExplicitOverDerived::pressure(None, Some(16.0)).unwrap(),
            PressureSpec::Pn(16.0)
        );
    }

    #[test]
    fn length_wins_over_mass() {
        assert_eq!(
            PreferExplicitOverDerived::quantity(Some(12.0), Some(999.0)).unwrap(),
            QuantitySpec::Length(12.0)
        );
    }

    #[test]
    fn total_wins_over_unit() {
        let spec = PreferExplicitOverDerived::price(Some(dec!(10)), Some(dec!(1234))).unwrap();
        assert_eq!(spec.explicit_total(), Some(dec!(1234)));
    }

    #[test]
    fn missing_pairs_are_input_errors() {
        let e = PreferExplicitOverDerived::pressure(None, None).unwrap_err();
        assert_eq!(e.to_string(), "input error: Please provide either SDR or PN");
        let e = PreferExplicitOverDerived::quantity(None, None).unwrap_err();
        assert!(e.to_string().contains("Length or Total Mass"));
        let e = PreferExplicitOverDerived::price(None, None).unwrap_err();
        assert!(e.to_string().contains("Price per kg or Total Price"));
    }

    #[test]
    fn form_fields() {
        assert_eq!(parse_field("length", " 120.5 ").unwrap(), Some(120.5));
        assert_eq!(parse_field("length", "").unwrap(), None);
        assert!(parse_field("length", "12m").is_err());
        assert_eq!(
            parse_money_field("total price", "1,250,000").unwrap(),
            Some(dec!(1250000))
        );
        assert!(parse_money_field("total price", "abc").is_err());
    }
}
