use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{PricingError, Result};

/// Source of invoice numbers.
///
/// Numbers are plain, unpadded integers. The sequencer only remembers the
/// highest number used so far; the next suggestion is one above it.
pub trait InvoiceSequencer {
    /// Suggest the next invoice number without consuming it.
    fn next_invoice_number(&self) -> Result<u64>;

    /// Record that `number` was issued.
    fn record_used(&mut self, number: u64) -> Result<()>;
}

/// In-process sequencer, mostly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemorySequencer {
    highest: u64,
}

impl MemorySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after an already issued number.
    pub fn starting_after(highest: u64) -> Self {
        Self { highest }
    }

    pub fn highest(&self) -> u64 {
        self.highest
    }
}

impl InvoiceSequencer for MemorySequencer {
    fn next_invoice_number(&self) -> Result<u64> {
        self.highest
            .checked_add(1)
            .ok_or_else(|| PricingError::Numbering("invoice counter overflow".into()))
    }

    fn record_used(&mut self, number: u64) -> Result<()> {
        self.highest = number;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CounterFile {
    counter: u64,
}

/// Sequencer persisted as `{"counter": <n>}` in a JSON file.
///
/// A missing file reads as counter 0. A corrupt file also reads as 0 and is
/// overwritten on the next [`record_used`](InvoiceSequencer::record_used).
/// A write failure is returned from `record_used`; [`assign_invoice_number`]
/// logs it and keeps the number.
#[derive(Debug, Clone)]
pub struct FileSequencer {
    path: PathBuf,
}

impl FileSequencer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Highest number recorded in the counter file.
    pub fn highest(&self) -> Result<u64> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<CounterFile>(&raw) {
            Ok(file) => Ok(file.counter),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable invoice counter, starting from 0");
                Ok(0)
            }
        }
    }
}

impl InvoiceSequencer for FileSequencer {
    fn next_invoice_number(&self) -> Result<u64> {
        self.highest()?
            .checked_add(1)
            .ok_or_else(|| PricingError::Numbering("invoice counter overflow".into()))
    }

    fn record_used(&mut self, number: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string(&CounterFile { counter: number })
            .map_err(|e| PricingError::Numbering(e.to_string()))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

/// Pick the number for a new invoice and record it.
///
/// A user-entered number wins and must be a positive integer; otherwise the
/// sequencer's next number is used. Either way the chosen number becomes the
/// recorded counter, so the following suggestion is one above it.
///
/// A failure to record the number is logged and does not block the invoice.
pub fn assign_invoice_number(
    sequencer: &mut dyn InvoiceSequencer,
    user_entered: Option<&str>,
) -> Result<u64> {
    let number = match user_entered.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(PricingError::Input(format!(
                    "invoice number '{raw}' is not a valid positive integer"
                )));
            }
        },
        None => sequencer.next_invoice_number()?,
    };
    if let Err(e) = sequencer.record_used(number) {
        warn!(number, error = %e, "could not record invoice number");
    }
    Ok(number)
}
