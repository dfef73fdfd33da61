use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{PricingError, Result};
use super::types::*;
use crate::discount;

fn sum_line_totals(items: &[LineItem]) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.total_price())
            .ok_or_else(PricingError::out_of_range)
    })
}

/// Caller-owned list of line items collected before an invoice is issued.
///
/// Items can be appended or removed; they are never modified in place.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDraft {
    items: Vec<LineItem>,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its 0-based index.
    pub fn add(&mut self, item: LineItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Remove the item at `index`, shifting later items up.
    pub fn remove(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(PricingError::Input(format!(
                "no item at position {} (draft has {} items)",
                index + 1,
                self.items.len()
            )));
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Decimal> {
        sum_line_totals(&self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

/// Builder for a finalized [`Invoice`].
///
/// ```
/// use pipebill::core::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let item = LineItem::Fitting(FittingLine {
///     fitting_type: "Electrofusion".into(),
///     product: "Coupler".into(),
///     size: "110".into(),
///     pn: "16".into(),
///     quantity: 4,
///     unit_price: dec!(455000),
///     total_price: dec!(1820000),
/// });
///
/// let invoice = InvoiceBuilder::new(17, "Karaj Water Co.", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .add_item(item)
///     .discount(DiscountMode::Custom(dec!(5)))
///     .value_added(dec!(0.10))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.discount, dec!(91000));
/// assert_eq!(invoice.totals.grand_total, dec!(1901900));
/// ```
pub struct InvoiceBuilder {
    number: u64,
    customer_name: String,
    issue_date: NaiveDate,
    note: Option<String>,
    items: Vec<LineItem>,
    discount: DiscountMode,
    value_added_rate: Option<Decimal>,
}

impl InvoiceBuilder {
    pub fn new(number: u64, customer_name: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number,
            customer_name: customer_name.into(),
            issue_date,
            note: None,
            items: Vec::new(),
            discount: DiscountMode::None,
            value_added_rate: None,
        }
    }

    /// Free-text note. Blank notes are dropped.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn discount(mut self, mode: DiscountMode) -> Self {
        self.discount = mode;
        self
    }

    /// Enable the value-added surcharge at `rate` (a fraction, e.g. 0.10).
    pub fn value_added(mut self, rate: Decimal) -> Self {
        self.value_added_rate = Some(rate);
        self
    }

    /// Build the invoice and compute its totals.
    pub fn build(self) -> Result<Invoice> {
        if self.customer_name.trim().is_empty() {
            return Err(PricingError::Input("please enter the customer name".into()));
        }
        if self.items.is_empty() {
            return Err(PricingError::Input(
                "add at least one item before generating an invoice".into(),
            ));
        }
        if self.number == 0 {
            return Err(PricingError::Numbering("invoice number must be positive".into()));
        }

        let subtotal = sum_line_totals(&self.items)?;
        let totals = discount::compute_totals(subtotal, &self.discount, self.value_added_rate)?;

        Ok(Invoice {
            number: self.number,
            customer_name: self.customer_name.trim().to_string(),
            issue_date: self.issue_date,
            note: self.note,
            items: self.items,
            discount: self.discount,
            value_added_rate: self.value_added_rate,
            totals,
        })
    }
}
