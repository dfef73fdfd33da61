use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::{PricingError, Result};

/// Default value-added surcharge rate (10 %), applied to the discounted net.
pub const DEFAULT_VALUE_ADDED_RATE: Decimal = dec!(0.10);

/// Engine configuration: where reference tables live, where the invoice
/// counter is kept, and the value-added rate.
///
/// Relative file names are resolved against `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the reference CSV files.
    pub data_dir: PathBuf,
    /// Grade × SDR → PN table.
    pub series_file: PathBuf,
    /// Diameter × SDR → kg/m table.
    pub weight_file: PathBuf,
    /// Threshold → percentage discount schedule.
    pub discount_file: PathBuf,
    /// Fittings catalog.
    pub fittings_file: PathBuf,
    /// Where the rendering layer writes finished documents.
    pub output_dir: PathBuf,
    /// JSON invoice counter.
    pub counter_file: PathBuf,
    /// Surcharge rate as a fraction of the net amount.
    pub value_added_rate: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            series_file: "pipe_series_sdr.csv".into(),
            weight_file: "DIN_pivot.csv".into(),
            discount_file: "discount.csv".into(),
            fittings_file: "fittings.csv".into(),
            output_dir: "output".into(),
            counter_file: "invoice_counter.json".into(),
            value_added_rate: DEFAULT_VALUE_ADDED_RATE,
        }
    }
}

impl Config {
    /// Defaults with a different data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| PricingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.value_added_rate < Decimal::ZERO || self.value_added_rate > Decimal::ONE {
            return Err(PricingError::Config(format!(
                "value_added_rate {} must be between 0 and 1",
                self.value_added_rate
            )));
        }
        Ok(())
    }

    pub fn series_path(&self) -> PathBuf {
        self.data_dir.join(&self.series_file)
    }

    pub fn weight_path(&self) -> PathBuf {
        self.data_dir.join(&self.weight_file)
    }

    pub fn discount_path(&self) -> PathBuf {
        self.data_dir.join(&self.discount_file)
    }

    pub fn fittings_path(&self) -> PathBuf {
        self.data_dir.join(&self.fittings_file)
    }

    pub fn counter_path(&self) -> PathBuf {
        self.data_dir.join(&self.counter_file)
    }
}
