use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::parse::{parse_number, parse_sdr_axis, read_records, sdr_column};
use crate::core::{PricingError, Result};

/// Diameter × SDR → mass per meter (kg/m).
///
/// An empty cell marks a diameter/SDR combination that is not manufactured;
/// looking it up is an error, never zero.
#[derive(Debug, Clone)]
pub struct WeightTable {
    sdrs: Vec<Option<f64>>,
    rows: Vec<(f64, Vec<String>)>,
}

impl WeightTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records = read_records(reader)?;
        let Some((header, body)) = records.split_first() else {
            return Err(PricingError::Data("weight table is empty".into()));
        };
        let sdrs = parse_sdr_axis(header, "weight table")?;

        let mut rows: Vec<(f64, Vec<String>)> = Vec::new();
        for record in body {
            // Rows without a numeric diameter (notes, blank lines) carry no data.
            let Some(diameter) = record.get(0).and_then(parse_number) else {
                continue;
            };
            if rows.iter().any(|(d, _)| *d == diameter) {
                return Err(PricingError::Data(format!(
                    "duplicate diameter {diameter} in weight table"
                )));
            }
            rows.push((diameter, record.iter().skip(1).map(str::to_string).collect()));
        }

        debug!(diameters = rows.len(), sdr_columns = sdrs.len(), "loaded weight table");
        Ok(Self { sdrs, rows })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Mass per meter of pipe with outside `diameter` (mm) in series `sdr`.
    pub fn mass_per_length(&self, diameter: f64, sdr: f64) -> Result<f64> {
        let col = sdr_column(&self.sdrs, sdr)
            .ok_or_else(|| PricingError::NotFound(format!("SDR {sdr} in weight table")))?;
        let (_, cells) = self
            .rows
            .iter()
            .find(|(d, _)| *d == diameter)
            .ok_or_else(|| PricingError::NotFound(format!("diameter {diameter} in weight table")))?;
        let cell = cells.get(col - 1).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            return Err(PricingError::Data(format!(
                "weight for diameter {diameter} and SDR {sdr} missing in weight table"
            )));
        }
        parse_number(cell).ok_or_else(|| {
            PricingError::Data(format!(
                "invalid weight value {cell:?} for diameter {diameter} and SDR {sdr}"
            ))
        })
    }

    /// All diameters in the table, ascending.
    pub fn diameters(&self) -> Vec<f64> {
        let mut diameters: Vec<f64> = self.rows.iter().map(|(d, _)| *d).collect();
        diameters.sort_by(f64::total_cmp);
        diameters
    }

    /// Diameters that have a usable weight in series `sdr`, ascending.
    ///
    /// Unknown SDRs yield an empty list.
    pub fn diameters_for_sdr(&self, sdr: f64) -> Vec<f64> {
        let Some(col) = sdr_column(&self.sdrs, sdr) else {
            return Vec::new();
        };
        let mut diameters: Vec<f64> = self
            .rows
            .iter()
            .filter(|(_, cells)| cells.get(col - 1).and_then(|c| parse_number(c)).is_some())
            .map(|(d, _)| *d)
            .collect();
        diameters.sort_by(f64::total_cmp);
        diameters
    }

    /// SDR columns present in the header, in column order.
    pub fn sdrs(&self) -> Vec<f64> {
        self.sdrs.iter().flatten().copied().collect()
    }
}
