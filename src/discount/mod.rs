//! Discount and value-added surcharge arithmetic.
//!
//! Totals are computed in a fixed order: subtotal, then discount, then the
//! surcharge on the discounted net.

mod tiered;

pub use tiered::{BracketShare, tiered_breakdown, tiered_discount};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::core::{DiscountMode, PricingError, Result, Totals};

/// Custom discount entered on the invoice form.
///
/// A value up to and including 100 is a percentage of `subtotal`; anything
/// above 100 is an absolute amount. The amount is returned uncapped; see
/// [`compute_totals`] for the cap at the subtotal.
pub fn custom_discount(value: Decimal, subtotal: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::Input(format!(
            "discount must not be negative, got {value}"
        )));
    }
    if value <= dec!(100) {
        subtotal
            .checked_mul(value / dec!(100))
            .ok_or_else(PricingError::out_of_range)
    } else {
        Ok(value)
    }
}

/// Value-added surcharge on the discounted net.
pub fn surcharge(net: Decimal, rate: Decimal) -> Result<Decimal> {
    net.checked_mul(rate).ok_or_else(PricingError::out_of_range)
}

/// Subtotal → discount → net → surcharge → grand total.
///
/// The discount never exceeds the subtotal, so net and grand total stay
/// non-negative. `value_added_rate` is a fraction in `0..=1`.
pub fn compute_totals(
    subtotal: Decimal,
    mode: &DiscountMode,
    value_added_rate: Option<Decimal>,
) -> Result<Totals> {
    if let Some(rate) = value_added_rate {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(PricingError::Input(format!(
                "value-added rate must be between 0 and 1, got {rate}"
            )));
        }
    }

    let raw = match mode {
        DiscountMode::None => Decimal::ZERO,
        DiscountMode::Tiered(schedule) => tiered_discount(schedule, subtotal),
        DiscountMode::Custom(value) => custom_discount(*value, subtotal)?,
    };
    let discount = raw.min(subtotal).max(Decimal::ZERO);
    if discount < raw {
        debug!(%raw, %subtotal, "discount capped at subtotal");
    }

    let net = subtotal - discount;
    let value_added = match value_added_rate {
        Some(rate) => surcharge(net, rate)?,
        None => Decimal::ZERO,
    };
    let grand_total = net
        .checked_add(value_added)
        .ok_or_else(PricingError::out_of_range)?;
    Ok(Totals {
        subtotal,
        discount,
        net,
        value_added,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Bracket, DiscountSchedule};

    #[test]
    fn custom_percentage_boundary() {
        assert_eq!(custom_discount(dec!(100), dec!(5000)).unwrap(), dec!(5000));
        assert_eq!(custom_discount(dec!(100.01), dec!(5000)).unwrap(), dec!(100.01));
        assert_eq!(custom_discount(dec!(5), dec!(2000)).unwrap(), dec!(100));
        assert_eq!(custom_discount(dec!(0), dec!(2000)).unwrap(), dec!(0));
    }

    #[test]
    fn negative_custom_discount_rejected() {
        assert!(matches!(
            custom_discount(dec!(-1), dec!(100)),
            Err(PricingError::Input(_))
        ));
    }

    #[test]
    fn surcharge_applies_after_discount() {
        let t = compute_totals(dec!(1000), &DiscountMode::Custom(dec!(10)), Some(dec!(0.10)))
            .unwrap();
        assert_eq!(t.discount, dec!(100));
        assert_eq!(t.net, dec!(900));
        assert_eq!(t.value_added, dec!(90));
        assert_eq!(t.grand_total, dec!(990));
    }

    #[test]
    fn discount_capped_at_subtotal() {
        let t = compute_totals(dec!(500), &DiscountMode::Custom(dec!(800)), None).unwrap();
        assert_eq!(t.discount, dec!(500));
        assert_eq!(t.net, Decimal::ZERO);
        assert_eq!(t.grand_total, Decimal::ZERO);
    }

    #[test]
    fn tiered_mode() {
        let schedule = DiscountSchedule::new([
            Bracket::new(dec!(100), dec!(2)),
            Bracket::new(dec!(500), dec!(4)),
            Bracket::new(dec!(700), dec!(6)),
        ]);
        let t = compute_totals(dec!(800), &DiscountMode::Tiered(schedule), None).unwrap();
        assert_eq!(t.discount, dec!(22));
        assert_eq!(t.grand_total, dec!(778));
    }

    #[test]
    fn huge_amounts_do_not_panic() {
        assert!(surcharge(Decimal::MAX, dec!(0.5)).is_ok());
        assert!(matches!(
            compute_totals(Decimal::MAX, &DiscountMode::None, Some(dec!(0.10))),
            Err(PricingError::Input(_))
        ));
        let t = compute_totals(Decimal::MAX, &DiscountMode::Custom(dec!(100)), Some(dec!(1)))
            .unwrap();
        assert_eq!(t.grand_total, Decimal::ZERO);
    }

    #[test]
    fn rate_out_of_range() {
        assert!(compute_totals(dec!(1), &DiscountMode::None, Some(dec!(1.5))).is_err());
        assert!(compute_totals(dec!(1), &DiscountMode::None, Some(dec!(-0.1))).is_err());
    }
}
