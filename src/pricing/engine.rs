use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::derivation::quantity_to_decimal;
use super::resolve::{self, ResolvedPipeSpec, ResolvedPricing, ResolvedQuantity};
use super::spec::{PreferExplicitOverDerived, PriceSpec};
use crate::clock::{DateSource, issue_date};
use crate::core::{
    Config, DiscountMode, FittingLine, Invoice, InvoiceBuilder, InvoiceDraft, InvoiceSequencer,
    LineItem, PipeLine, PricingError, Result, Totals, assign_invoice_number,
};
use crate::discount;
use crate::tables::ReferenceTables;

/// Pipe form contents. Unset fields are derived from the set ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeRequest {
    pub grade: String,
    pub pn: Option<f64>,
    pub sdr: Option<f64>,
    pub diameter: f64,
    pub length: Option<f64>,
    pub total_mass: Option<f64>,
    /// Price per kg.
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

/// Fittings form contents. With neither price set, the catalog price is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FittingRequest {
    pub fitting_type: String,
    pub product: String,
    pub size: String,
    pub quantity: u32,
    /// Price per piece.
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

/// Discount option ticked on the invoice form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum DiscountChoice {
    #[default]
    None,
    /// Bracketed discount over the loaded schedule.
    Tiered,
    Custom(Decimal),
}

/// Invoice-level form contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub customer_name: String,
    /// User-entered invoice number; blank or absent means "next in sequence".
    pub invoice_number: Option<String>,
    pub note: Option<String>,
    pub discount: DiscountChoice,
    /// Apply the configured value-added surcharge.
    pub value_added: bool,
}

/// Prices line items and assembles invoices against one set of loaded
/// reference tables.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    tables: ReferenceTables,
    config: Config,
}

impl PricingEngine {
    pub fn new(tables: ReferenceTables, config: Config) -> Self {
        Self { tables, config }
    }

    /// Validate `config` and load every table it names.
    pub fn load(config: Config) -> Result<Self> {
        config.validate()?;
        let tables = ReferenceTables::load(&config)?;
        Ok(Self::new(tables, config))
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolve_pipe_spec(
        &self,
        grade: &str,
        pn: Option<f64>,
        sdr: Option<f64>,
        diameter: f64,
    ) -> Result<ResolvedPipeSpec> {
        let pressure = PreferExplicitOverDerived::pressure(sdr, pn)?;
        resolve::resolve_pipe_spec(
            &self.tables.series,
            &self.tables.weights,
            grade,
            pressure,
            diameter,
        )
    }

    pub fn resolve_quantity(
        &self,
        length: Option<f64>,
        total_mass: Option<f64>,
        diameter: f64,
        sdr: f64,
    ) -> Result<ResolvedQuantity> {
        let quantity = PreferExplicitOverDerived::quantity(length, total_mass)?;
        resolve::resolve_quantity(&self.tables.weights, quantity, diameter, sdr)
    }

    pub fn resolve_pricing(
        &self,
        unit_price: Option<Decimal>,
        total_price: Option<Decimal>,
        quantity_equivalent: Decimal,
    ) -> Result<ResolvedPricing> {
        let price = PreferExplicitOverDerived::price(unit_price, total_price)?;
        resolve::resolve_pricing(price, quantity_equivalent)
    }

    /// Bracketed discount over the loaded schedule.
    pub fn compute_tiered_discount(&self, subtotal: Decimal) -> Decimal {
        discount::tiered_discount(&self.tables.discounts, subtotal)
    }

    pub fn compute_custom_discount(&self, value: Decimal, subtotal: Decimal) -> Result<Decimal> {
        discount::custom_discount(value, subtotal)
    }

    /// Surcharge at the configured value-added rate.
    pub fn compute_surcharge(&self, net: Decimal) -> Result<Decimal> {
        discount::surcharge(net, self.config.value_added_rate)
    }

    /// Single-rate percentage of the schedule step reached by `price`.
    pub fn discount_percent(&self, price: Decimal) -> Decimal {
        self.tables.discounts.discount_percent(price)
    }

    /// Price one pipe run.
    pub fn price_pipe(&self, request: &PipeRequest) -> Result<LineItem> {
        let spec = self.resolve_pipe_spec(
            &request.grade,
            request.pn,
            request.sdr,
            request.diameter,
        )?;
        let quantity =
            self.resolve_quantity(request.length, request.total_mass, spec.diameter, spec.sdr)?;
        let mass = quantity_to_decimal(quantity.total_mass)?;
        let pricing = self.resolve_pricing(request.unit_price, request.total_price, mass)?;

        debug!(
            grade = %spec.grade,
            sdr = spec.sdr,
            diameter = spec.diameter,
            length = quantity.length,
            total = %pricing.total_price,
            "priced pipe"
        );
        Ok(LineItem::Pipe(PipeLine {
            grade: spec.grade,
            pn: spec.pn,
            sdr: spec.sdr,
            diameter: spec.diameter,
            length: quantity.length,
            mass_per_length: spec.mass_per_length,
            total_mass: quantity.total_mass,
            unit_price: pricing.unit_price,
            total_price: pricing.total_price,
        }))
    }

    /// Price a number of identical fittings.
    pub fn price_fitting(&self, request: &FittingRequest) -> Result<LineItem> {
        let row = self
            .tables
            .fittings
            .row(&request.fitting_type, &request.product, &request.size)?;
        if request.quantity == 0 {
            return Err(PricingError::Input("quantity must be at least 1".into()));
        }
        let price = match (request.unit_price, request.total_price) {
            (None, None) => PriceSpec::UnitPrice(row.unit_price),
            (unit, total) => PreferExplicitOverDerived::price(unit, total)?,
        };
        let pricing = resolve::resolve_pricing(price, Decimal::from(request.quantity))?;

        debug!(
            fitting_type = %row.fitting_type,
            product = %row.product,
            size = %row.size,
            quantity = request.quantity,
            total = %pricing.total_price,
            "priced fitting"
        );
        Ok(LineItem::Fitting(FittingLine {
            fitting_type: row.fitting_type,
            product: row.product,
            size: row.size,
            pn: row.pn,
            quantity: request.quantity,
            unit_price: pricing.unit_price,
            total_price: pricing.total_price,
        }))
    }

    pub fn discount_mode(&self, choice: DiscountChoice) -> DiscountMode {
        match choice {
            DiscountChoice::None => DiscountMode::None,
            DiscountChoice::Tiered => DiscountMode::Tiered(self.tables.discounts.clone()),
            DiscountChoice::Custom(value) => DiscountMode::Custom(value),
        }
    }

    fn value_added_rate(&self, enabled: bool) -> Option<Decimal> {
        enabled.then_some(self.config.value_added_rate)
    }

    /// Running totals for the form summary.
    pub fn totals(
        &self,
        subtotal: Decimal,
        choice: DiscountChoice,
        value_added: bool,
    ) -> Result<Totals> {
        discount::compute_totals(
            subtotal,
            &self.discount_mode(choice),
            self.value_added_rate(value_added),
        )
    }

    /// Turn a draft into a numbered, dated invoice.
    ///
    /// Everything that can be rejected is checked before a number is
    /// consumed, so a failed attempt never skips a number.
    pub fn finalize(
        &self,
        draft: &InvoiceDraft,
        request: &InvoiceRequest,
        sequencer: &mut dyn InvoiceSequencer,
        dates: &dyn DateSource,
    ) -> Result<Invoice> {
        if request.customer_name.trim().is_empty() {
            return Err(PricingError::Input("please enter the customer name".into()));
        }
        if draft.is_empty() {
            return Err(PricingError::Input(
                "add at least one item before generating an invoice".into(),
            ));
        }
        self.totals(draft.subtotal()?, request.discount, request.value_added)?;

        let number = assign_invoice_number(sequencer, request.invoice_number.as_deref())?;
        let mut builder = InvoiceBuilder::new(number, &request.customer_name, issue_date(dates))
            .items(draft.items().iter().cloned())
            .discount(self.discount_mode(request.discount));
        if let Some(note) = &request.note {
            builder = builder.note(note.as_str());
        }
        if let Some(rate) = self.value_added_rate(request.value_added) {
            builder = builder.value_added(rate);
        }
        let invoice = builder.build()?;

        info!(
            number = invoice.number,
            items = invoice.items.len(),
            grand_total = %invoice.totals.grand_total,
            "invoice finalized"
        );
        Ok(invoice)
    }
}
