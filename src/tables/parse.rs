use std::io::Read;

use csv::StringRecord;

use crate::core::{PricingError, Result};

/// Read every record of a headerless, comma-separated table.
///
/// Rows may have differing lengths; cells are trimmed.
pub(crate) fn read_records<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in rdr.records() {
        records.push(record?);
    }
    Ok(records)
}

/// Parse a numeric table key or cell. Empty cells yield `None`.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the SDR axis from a header row whose first cell is a label.
///
/// Blank header cells leave their column unaddressable. Duplicate or
/// non-numeric SDR headers are a data error.
pub(crate) fn parse_sdr_axis(header: &StringRecord, table: &str) -> Result<Vec<Option<f64>>> {
    let mut axis: Vec<Option<f64>> = Vec::with_capacity(header.len().saturating_sub(1));
    for cell in header.iter().skip(1) {
        if cell.is_empty() {
            axis.push(None);
            continue;
        }
        let sdr = parse_number(cell).ok_or_else(|| {
            PricingError::Data(format!("invalid SDR value in {table} header: {cell:?}"))
        })?;
        if axis.iter().flatten().any(|&s| s == sdr) {
            return Err(PricingError::Data(format!(
                "duplicate SDR column {sdr} in {table} header"
            )));
        }
        axis.push(Some(sdr));
    }
    Ok(axis)
}

/// Column index (into the row, i.e. offset by the label column) for `sdr`.
pub(crate) fn sdr_column(axis: &[Option<f64>], sdr: f64) -> Option<usize> {
    axis.iter().position(|s| *s == Some(sdr)).map(|i| i + 1)
}
