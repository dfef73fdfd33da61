use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::parse::read_records;
use crate::core::Result;

/// One step of a discount schedule: `percent` applies from `threshold` up to
/// the next step's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub threshold: Decimal,
    pub percent: Decimal,
}

impl Bracket {
    /// Implicit first step: nothing is discounted below the first threshold.
    pub const FLOOR: Bracket = Bracket {
        threshold: Decimal::ZERO,
        percent: Decimal::ZERO,
    };

    pub fn new(threshold: Decimal, percent: Decimal) -> Self {
        Self { threshold, percent }
    }

    fn is_valid(&self) -> bool {
        self.threshold >= Decimal::ZERO
            && self.percent >= Decimal::ZERO
            && self.percent <= dec!(100)
    }
}

/// Price threshold → discount percentage schedule.
///
/// Always starts with the `(0, 0)` floor, thresholds strictly increase, and
/// percentages lie in 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct DiscountSchedule {
    brackets: Vec<Bracket>,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self {
            brackets: vec![Bracket::FLOOR],
        }
    }
}

impl DiscountSchedule {
    /// Normalize raw steps into a schedule.
    ///
    /// Steps with a negative threshold or a percentage outside 0–100 are
    /// dropped. When several steps share a threshold the last one wins; a
    /// step at threshold 0 replaces the floor.
    pub fn new(steps: impl IntoIterator<Item = Bracket>) -> Self {
        let mut steps: Vec<Bracket> = steps
            .into_iter()
            .filter(|b| {
                let ok = b.is_valid();
                if !ok {
                    warn!(threshold = %b.threshold, percent = %b.percent, "dropping out-of-range discount step");
                }
                ok
            })
            .collect();
        // Stable, so equal thresholds keep file order and the later one wins below.
        steps.sort_by(|a, b| a.threshold.cmp(&b.threshold));

        let mut brackets = vec![Bracket::FLOOR];
        for step in steps {
            match brackets.last_mut() {
                Some(last) if last.threshold == step.threshold => *last = step,
                _ => brackets.push(step),
            }
        }
        Self { brackets }
    }

    /// Parse a headerless two-column `threshold,percentage` file.
    ///
    /// Rows that are short or non-numeric are skipped; one bad row never
    /// invalidates the rest of the schedule.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records = read_records(reader)?;
        let mut steps = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            let (Some(threshold), Some(percent)) = (record.get(0), record.get(1)) else {
                if record.iter().any(|c| !c.is_empty()) {
                    warn!(line = line + 1, "skipping discount row with fewer than two cells");
                }
                continue;
            };
            match (Decimal::from_str(threshold), Decimal::from_str(percent)) {
                (Ok(threshold), Ok(percent)) => steps.push(Bracket::new(threshold, percent)),
                _ => warn!(line = line + 1, ?record, "skipping malformed discount row"),
            }
        }
        let schedule = Self::new(steps);
        debug!(brackets = schedule.brackets.len(), "loaded discount schedule");
        Ok(schedule)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Like [`load`](Self::load), but a missing file means "no discount steps".
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match std::fs::File::open(path.as_ref()) {
            Ok(file) => Self::from_reader(file),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.as_ref().display(), "no discount schedule file");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Steps including the floor, ascending by threshold.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// True when the schedule has no step beyond the zero floor.
    pub fn is_flat(&self) -> bool {
        self.brackets.iter().all(|b| b.percent.is_zero())
    }

    /// Single-rate lookup: the percentage of the highest threshold `<= price`.
    ///
    /// This is a step function applied to the whole amount, unlike the
    /// bracketed sum in [`crate::discount::tiered_discount`]. Invoice totals
    /// use the bracketed sum.
    pub fn discount_percent(&self, price: Decimal) -> Decimal {
        self.brackets
            .iter()
            .take_while(|b| b.threshold <= price)
            .last()
            .map_or(Decimal::ZERO, |b| b.percent)
    }
}

impl From<Vec<Bracket>> for DiscountSchedule {
    fn from(steps: Vec<Bracket>) -> Self {
        Self::new(steps)
    }
}

impl From<DiscountSchedule> for Vec<Bracket> {
    fn from(schedule: DiscountSchedule) -> Self {
        schedule.brackets
    }
}
