//! Read-only reference data: grade × SDR → PN, diameter × SDR → kg/m,
//! the discount schedule, and the fittings catalog.
//!
//! Tables are comma-separated UTF-8 files loaded once per session and never
//! mutated afterwards. Numeric keys (SDR, PN, diameter) are compared as
//! `f64` after parsing, so `"17"` and `"17.0"` address the same column.
//!
//! # Example
//!
//! ```
//! use pipebill::tables::*;
//!
//! let series = PipeSeriesTable::from_reader(",17,11\nPE100,10,16\n".as_bytes()).unwrap();
//! assert_eq!(series.sdr_for_grade_and_pn("pe100", 16.0).unwrap(), 11.0);
//! ```

mod catalog;
mod parse;
mod schedule;
mod series;
mod weight;

pub use catalog::{
    COL_PN, COL_PRODUCT, COL_SIZE, COL_TYPE, COL_UNIT_PRICE, FittingRow, FittingsCatalog,
};
pub use schedule::{Bracket, DiscountSchedule};
pub use series::PipeSeriesTable;
pub use weight::WeightTable;

use crate::core::{Config, Result};

/// All reference tables of a session.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub series: PipeSeriesTable,
    pub weights: WeightTable,
    pub discounts: DiscountSchedule,
    pub fittings: FittingsCatalog,
}

impl ReferenceTables {
    /// Load every table named in `config`.
    ///
    /// The series and weight tables are required. A missing discount file
    /// means no discount steps, and a missing fittings file an empty catalog.
    pub fn load(config: &Config) -> Result<Self> {
        let series = PipeSeriesTable::load(config.series_path())?;
        let weights = WeightTable::load(config.weight_path())?;
        let discounts = DiscountSchedule::load_or_default(config.discount_path())?;
        let fittings_path = config.fittings_path();
        let fittings = if fittings_path.exists() {
            FittingsCatalog::load(fittings_path)?
        } else {
            FittingsCatalog::default()
        };
        Ok(Self {
            series,
            weights,
            discounts,
            fittings,
        })
    }
}
