use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PricingError, Result};

/// Header names the catalog is addressed by. Matching is on exact text.
pub const COL_TYPE: &str = "type";
pub const COL_PRODUCT: &str = "product";
pub const COL_SIZE: &str = "size";
pub const COL_PN: &str = "pn";
pub const COL_UNIT_PRICE: &str = "unit_price";

/// A full catalog row for one fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingRow {
    pub fitting_type: String,
    pub product: String,
    pub size: String,
    pub pn: String,
    pub unit_price: Decimal,
    /// Any further columns, keyed by header.
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Record {
    fitting_type: String,
    product: String,
    size: String,
    pn: String,
    unit_price: String,
    extra: BTreeMap<String, String>,
}

/// Fittings price list: one row per (type, product, size).
#[derive(Debug, Clone, Default)]
pub struct FittingsCatalog {
    records: Vec<Record>,
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PricingError::Data(format!("fittings catalog has no '{name}' column")))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

impl FittingsCatalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let type_col = column(&headers, COL_TYPE)?;
        let product_col = column(&headers, COL_PRODUCT)?;
        let size_col = column(&headers, COL_SIZE)?;
        let pn_col = column(&headers, COL_PN)?;
        let price_col = column(&headers, COL_UNIT_PRICE)?;
        let known = [type_col, product_col, size_col, pn_col, price_col];

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let cell = |i: usize| row.get(i).unwrap_or("").to_string();
            if cell(type_col).is_empty() {
                continue;
            }
            let extra = headers
                .iter()
                .enumerate()
                .filter(|(i, _)| !known.contains(i))
                .filter_map(|(i, h)| row.get(i).map(|v| (h.to_string(), v.to_string())))
                .collect();
            records.push(Record {
                fitting_type: cell(type_col),
                product: cell(product_col),
                size: cell(size_col),
                pn: cell(pn_col),
                unit_price: cell(price_col),
                extra,
            });
        }

        debug!(rows = records.len(), "loaded fittings catalog");
        Ok(Self { records })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct fitting types, in catalog order.
    pub fn types(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.fitting_type.as_str()))
    }

    /// Distinct products of `fitting_type`, in catalog order.
    pub fn products(&self, fitting_type: &str) -> Vec<&str> {
        distinct(
            self.records
                .iter()
                .filter(|r| r.fitting_type == fitting_type)
                .map(|r| r.product.as_str()),
        )
    }

    /// Distinct sizes of a product, in catalog order.
    pub fn sizes(&self, fitting_type: &str, product: &str) -> Vec<&str> {
        distinct(
            self.records
                .iter()
                .filter(|r| r.fitting_type == fitting_type && r.product == product)
                .map(|r| r.size.as_str()),
        )
    }

    /// The full row for a (type, product, size) triple.
    pub fn row(&self, fitting_type: &str, product: &str, size: &str) -> Result<FittingRow> {
        let rec = self
            .records
            .iter()
            .find(|r| r.fitting_type == fitting_type && r.product == product && r.size == size)
            .ok_or_else(|| {
                PricingError::NotFound(format!("fitting {fitting_type} / {product} / {size}"))
            })?;
        let unit_price = Decimal::from_str(&rec.unit_price).map_err(|_| {
            PricingError::Data(format!(
                "invalid unit price {:?} for fitting {fitting_type} / {product} / {size}",
                rec.unit_price
            ))
        })?;
        Ok(FittingRow {
            fitting_type: rec.fitting_type.clone(),
            product: rec.product.clone(),
            size: rec.size.clone(),
            pn: rec.pn.clone(),
            unit_price,
            extra: rec.extra.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CATALOG: &str = "\
type,product,size,pn,unit_price,unit
Electrofusion,Coupler,63,16,185000,pcs
Electrofusion,Coupler,110,16,455000,pcs
Electrofusion,Tee,110,16,780000,pcs
Butt Fusion,Elbow 90,110,10,tbd,pcs
";

    fn catalog() -> FittingsCatalog {
        FittingsCatalog::from_reader(CATALOG.as_bytes()).unwrap()
    }

    #[test]
    fn browse() {
        let c = catalog();
        assert_eq!(c.types(), vec!["Electrofusion", "Butt Fusion"]);
        assert_eq!(c.products("Electrofusion"), vec!["Coupler", "Tee"]);
        assert_eq!(c.sizes("Electrofusion", "Coupler"), vec!["63", "110"]);
        assert!(c.products("Socket").is_empty());
    }

    #[test]
    fn fetch_row() {
        let row = catalog().row("Electrofusion", "Tee", "110").unwrap();
        assert_eq!(row.unit_price, dec!(780000));
        assert_eq!(row.pn, "16");
        assert_eq!(row.extra.get("unit").map(String::as_str), Some("pcs"));
    }

    #[test]
    fn missing_row_and_bad_price() {
        assert!(matches!(
            catalog().row("Electrofusion", "Tee", "63"),
            Err(PricingError::NotFound(_))
        ));
        assert!(matches!(
            catalog().row("Butt Fusion", "Elbow 90", "110"),
            Err(PricingError::Data(_))
        ));
    }

    #[test]
    fn header_must_match_exactly() {
        let err = FittingsCatalog::from_reader("Type,product,size,pn,unit_price\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, PricingError::Data(ref m) if m.contains("'type'")));
    }
}
