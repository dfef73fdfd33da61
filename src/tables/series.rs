use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::parse::{parse_number, parse_sdr_axis, read_records, sdr_column};
use crate::core::{PricingError, Result};

#[derive(Debug, Clone)]
struct GradeRow {
    name: String,
    key: String,
    cells: Vec<String>,
}

/// Grade × SDR → PN table.
///
/// First row holds the SDR axis (after a blank label cell); each further row
/// is one grade followed by the PN at each SDR, or an empty cell where the
/// grade does not come in that series.
#[derive(Debug, Clone)]
pub struct PipeSeriesTable {
    sdrs: Vec<Option<f64>>,
    rows: Vec<GradeRow>,
}

fn grade_key(grade: &str) -> String {
    grade.trim().to_uppercase()
}

impl PipeSeriesTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records = read_records(reader)?;
        let Some((header, body)) = records.split_first() else {
            return Err(PricingError::Data("pipe series table is empty".into()));
        };
        let sdrs = parse_sdr_axis(header, "pipe series")?;

        let mut rows: Vec<GradeRow> = Vec::new();
        for record in body {
            let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
                continue;
            };
            let key = grade_key(name);
            if rows.iter().any(|r| r.key == key) {
                return Err(PricingError::Data(format!(
                    "duplicate grade {name} in pipe series table"
                )));
            }
            rows.push(GradeRow {
                name: name.to_string(),
                key,
                cells: record.iter().skip(1).map(str::to_string).collect(),
            });
        }

        debug!(grades = rows.len(), sdr_columns = sdrs.len(), "loaded pipe series table");
        Ok(Self { sdrs, rows })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    fn row(&self, grade: &str) -> Result<&GradeRow> {
        let key = grade_key(grade);
        self.rows
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| PricingError::NotFound(format!("pipe grade {grade}")))
    }

    /// SDR of the series rated `pn` for `grade`.
    pub fn sdr_for_grade_and_pn(&self, grade: &str, pn: f64) -> Result<f64> {
        let row = self.row(grade)?;
        for (idx, cell) in row.cells.iter().enumerate() {
            let Some(cell_pn) = parse_number(cell) else {
                continue;
            };
            if cell_pn == pn {
                if let Some(Some(sdr)) = self.sdrs.get(idx) {
                    return Ok(*sdr);
                }
            }
        }
        Err(PricingError::NotFound(format!(
            "PN {pn} for pipe grade {grade}"
        )))
    }

    /// PN of `grade` at `sdr`.
    pub fn pn_for_grade_and_sdr(&self, grade: &str, sdr: f64) -> Result<f64> {
        let col = sdr_column(&self.sdrs, sdr)
            .ok_or_else(|| PricingError::NotFound(format!("SDR {sdr} in pipe series table")))?;
        let row = self.row(grade)?;
        let cell = row.cells.get(col - 1).map(String::as_str).unwrap_or("");
        if cell.is_empty() {
            return Err(PricingError::Data(format!(
                "PN for grade {grade} and SDR {sdr} missing in pipe series table"
            )));
        }
        parse_number(cell)
            .ok_or_else(|| PricingError::Data(format!("invalid PN value {cell:?} for grade {grade}")))
    }

    /// Grade names as written in the table, sorted.
    pub fn grades(&self) -> Vec<&str> {
        let mut grades: Vec<&str> = self.rows.iter().map(|r| r.name.as_str()).collect();
        grades.sort_unstable();
        grades
    }

    /// SDR series available for `grade`, ascending.
    pub fn sdrs_for_grade(&self, grade: &str) -> Result<Vec<f64>> {
        let row = self.row(grade)?;
        let mut sdrs: Vec<f64> = self
            .sdrs
            .iter()
            .zip(&row.cells)
            .filter_map(|(sdr, cell)| (*sdr).filter(|_| parse_number(cell).is_some()))
            .collect();
        sdrs.sort_by(f64::total_cmp);
        Ok(sdrs)
    }

    /// Distinct PN ratings available for `grade`, ascending.
    pub fn pns_for_grade(&self, grade: &str) -> Result<Vec<f64>> {
        let row = self.row(grade)?;
        let mut pns: Vec<f64> = row.cells.iter().filter_map(|c| parse_number(c)).collect();
        pns.sort_by(f64::total_cmp);
        pns.dedup();
        Ok(pns)
    }
}
