use pipebill::clock::LocalClock;
use pipebill::core::presentation::{display_lines, round_money};
use pipebill::core::*;
use pipebill::pricing::*;
use rust_decimal_macros::dec;

fn main() {
    let config = Config::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let engine = PricingEngine::load(config).expect("reference tables should load");

    let mut draft = InvoiceDraft::new();

    // PE100 SDR 17 → PN looked up, 120.5 m priced per kg
    draft.add(
        engine
            .price_pipe(&PipeRequest {
                grade: "PE100".into(),
                sdr: Some(17.0),
                diameter: 110.0,
                length: Some(120.5),
                unit_price: Some(dec!(52000)),
                ..Default::default()
            })
            .expect("pipe should price"),
    );

    // PE80 PN 12.5 → SDR looked up, bought by weight at an agreed total
    draft.add(
        engine
            .price_pipe(&PipeRequest {
                grade: "PE80".into(),
                pn: Some(12.5),
                diameter: 63.0,
                total_mass: Some(150.0),
                total_price: Some(dec!(7500000)),
                ..Default::default()
            })
            .expect("pipe should price"),
    );

    let mut numbers = MemorySequencer::starting_after(1023);
    let invoice = engine
        .finalize(
            &draft,
            &InvoiceRequest {
                customer_name: "Karaj Water Co.".into(),
                discount: DiscountChoice::Tiered,
                value_added: true,
                ..Default::default()
            },
            &mut numbers,
            &LocalClock,
        )
        .expect("invoice should be valid");

    println!(
        "Invoice {} for {} ({})",
        invoice.number, invoice.customer_name, invoice.issue_date
    );
    for line in display_lines(&invoice.items) {
        println!(
            "{:>2}. {:<24} {:>9} {:>9} kg {:>12} {:>14}",
            line.position,
            line.description,
            line.quantity,
            line.total_mass.unwrap_or_default(),
            line.unit_price,
            line.total_price,
        );
    }
    let t = &invoice.totals;
    println!("Subtotal:    {}", round_money(t.subtotal));
    println!("Discount:    {}", round_money(t.discount));
    println!("Value added: {}", round_money(t.value_added));
    println!("Total:       {}", round_money(t.grand_total));
}
