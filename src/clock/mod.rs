//! Where the issue date of an invoice comes from.

#[cfg(feature = "net-time")]
mod world_time;

#[cfg(feature = "net-time")]
pub use world_time::WorldTimeApi;

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::core::Result;

/// A source of "today".
pub trait DateSource {
    fn today(&self) -> Result<NaiveDate>;
}

/// The machine's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DateSource for LocalClock {
    fn today(&self) -> Result<NaiveDate> {
        Ok(Local::now().date_naive())
    }
}

/// A fixed date, for reproducible invoices and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> Result<NaiveDate> {
        Ok(self.0)
    }
}

/// Ask `source` for the date, falling back to the local clock if it fails.
pub fn issue_date(source: &dyn DateSource) -> NaiveDate {
    match source.today() {
        Ok(date) => date,
        Err(err) => {
            warn!(error = %err, "date source failed, using local clock");
            Local::now().date_naive()
        }
    }
}
