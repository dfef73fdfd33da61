use chrono::NaiveDate;
use pipebill::clock::FixedDate;
use pipebill::core::*;
use pipebill::pricing::*;
use rust_decimal_macros::dec;

fn main() {
    let config = Config::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let engine = PricingEngine::load(config).expect("reference tables should load");
    let catalog = &engine.tables().fittings;

    println!("=== Catalog ===");
    for fitting_type in catalog.types() {
        for product in catalog.products(fitting_type) {
            println!("{fitting_type} / {product}: {:?}", catalog.sizes(fitting_type, product));
        }
    }

    let mut draft = InvoiceDraft::new();
    let request = |product: &str, size: &str, quantity| FittingRequest {
        fitting_type: "Electrofusion".into(),
        product: product.into(),
        size: size.into(),
        quantity,
        ..Default::default()
    };
    draft.add(engine.price_fitting(&request("Coupler", "110", 4)).expect("listed"));
    draft.add(engine.price_fitting(&request("Tee", "110", 2)).expect("listed"));

    // Unknown size: recoverable, the form would show the message
    match engine.price_fitting(&request("Tee", "63", 1)) {
        Ok(_) => unreachable!(),
        Err(e) => println!("\nRejected: {e} (recoverable: {})", e.is_recoverable()),
    }

    let mut numbers = MemorySequencer::new();
    let invoice = engine
        .finalize(
            &draft,
            &InvoiceRequest {
                customer_name: "Site office".into(),
                invoice_number: Some("500".into()),
                note: Some("Delivery to north yard".into()),
                discount: DiscountChoice::Custom(dec!(250000)),
                value_added: false,
            },
            &mut numbers,
            &FixedDate(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
        )
        .expect("invoice should be valid");

    println!("\n=== Invoice {} ===", invoice.number);
    println!("{}", serde_json::to_string_pretty(&invoice).expect("serializable"));
    println!("Next suggested number: {}", numbers.next_invoice_number().expect("no overflow"));
}
