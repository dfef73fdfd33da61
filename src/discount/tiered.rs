use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::tables::DiscountSchedule;

/// The share of a subtotal that falls into one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketShare {
    /// Lower bound of the bracket.
    pub from: Decimal,
    /// Upper bound actually reached (the subtotal for the top bracket).
    pub to: Decimal,
    pub percent: Decimal,
    pub amount: Decimal,
}

/// Per-bracket breakdown of a tiered discount, like a marginal tax table.
///
/// Only brackets the subtotal actually reaches are returned.
pub fn tiered_breakdown(schedule: &DiscountSchedule, subtotal: Decimal) -> Vec<BracketShare> {
    let brackets = schedule.brackets();
    let mut shares = Vec::new();
    for (i, bracket) in brackets.iter().enumerate() {
        if subtotal <= bracket.threshold {
            break;
        }
        let ceiling = brackets.get(i + 1).map_or(subtotal, |next| next.threshold);
        let to = subtotal.min(ceiling);
        // percent <= 100, so a share never exceeds its slice
        shares.push(BracketShare {
            from: bracket.threshold,
            to,
            percent: bracket.percent,
            amount: (to - bracket.threshold) * (bracket.percent / dec!(100)),
        });
    }
    shares
}

/// Tiered discount for `subtotal`: each bracket's percentage applies only to
/// the slice of the subtotal between its threshold and the next one.
///
/// The result is continuous and non-decreasing in `subtotal`.
pub fn tiered_discount(schedule: &DiscountSchedule, subtotal: Decimal) -> Decimal {
    tiered_breakdown(schedule, subtotal)
        .iter()
        .map(|share| share.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Bracket;

    fn schedule() -> DiscountSchedule {
        DiscountSchedule::new([
            Bracket::new(dec!(100), dec!(2)),
            Bracket::new(dec!(500), dec!(4)),
            Bracket::new(dec!(700), dec!(6)),
        ])
    }

    #[test]
    fn worked_example() {
        // 400 × 2% + 200 × 4% + 100 × 6%
        assert_eq!(tiered_discount(&schedule(), dec!(800)), dec!(22));
    }

    #[test]
    fn below_first_step() {
        assert_eq!(tiered_discount(&schedule(), dec!(100)), Decimal::ZERO);
        assert_eq!(tiered_discount(&schedule(), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn breakdown_lists_reached_brackets() {
        let shares = tiered_breakdown(&schedule(), dec!(600));
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[1].from, dec!(100));
        assert_eq!(shares[1].to, dec!(500));
        assert_eq!(shares[1].amount, dec!(8));
        assert_eq!(shares[2].to, dec!(600));
        assert_eq!(shares[2].amount, dec!(4));
    }

    #[test]
    fn flat_schedule_gives_nothing() {
        assert_eq!(
            tiered_discount(&DiscountSchedule::default(), dec!(1000000)),
            Decimal::ZERO
        );
    }
}
