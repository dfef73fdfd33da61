//! Boundary behavior of table parsing, resolution and totals.

use pipebill::core::*;
use pipebill::discount::*;
use pipebill::pricing::*;
use pipebill::tables::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

#[test]
fn sdr_header_text_does_not_matter() {
    let series = PipeSeriesTable::from_reader(",17.0,11.00\nPE100,10,16\n".as_bytes()).unwrap();
    assert_eq!(series.pn_for_grade_and_sdr("PE100", 17.0).unwrap(), 10.0);
    assert_eq!(series.sdr_for_grade_and_pn("PE100", 16.0).unwrap(), 11.0);
}

#[test]
fn blank_header_cell_is_unaddressable() {
    let weights = WeightTable::from_reader(",17,,11\n110,2.020,9.999,3.016\n".as_bytes()).unwrap();
    assert_eq!(weights.sdrs(), vec![17.0, 11.0]);
    assert_eq!(weights.mass_per_length(110.0, 11.0).unwrap(), 3.016);
}

#[test]
fn duplicate_sdr_header_rejected() {
    let err = WeightTable::from_reader(",17,17\n110,2.020,2.020\n".as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
}

#[test]
fn empty_tables_rejected() {
    assert_eq!(
        PipeSeriesTable::from_reader("".as_bytes()).unwrap_err().kind(),
        ErrorKind::Data
    );
    assert_eq!(
        WeightTable::from_reader("".as_bytes()).unwrap_err().kind(),
        ErrorKind::Data
    );
}

#[test]
fn short_rows_read_as_blank_cells() {
    let weights = WeightTable::from_reader(",17,11\n110,2.020\n".as_bytes()).unwrap();
    assert_eq!(
        weights.mass_per_length(110.0, 11.0).unwrap_err().kind(),
        ErrorKind::Data
    );
}

#[test]
fn crlf_and_padding_tolerated() {
    let schedule = DiscountSchedule::from_reader(" 100 , 2 \r\n500,4\r\n".as_bytes()).unwrap();
    assert_eq!(schedule.brackets().len(), 3);
    assert_eq!(schedule.brackets()[1], Bracket::new(dec!(100), dec!(2)));
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn small_tables() -> ReferenceTables {
    ReferenceTables {
        series: PipeSeriesTable::from_reader(",17,11\nPE100,10,16\n".as_bytes()).unwrap(),
        weights: WeightTable::from_reader(",17,11\n110,2.020,3.016\n63,0,0.989\n".as_bytes())
            .unwrap(),
        discounts: DiscountSchedule::default(),
        fittings: FittingsCatalog::default(),
    }
}

#[test]
fn zero_weight_blocks_length_from_mass() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let err = engine.resolve_quantity(None, Some(10.0), 63.0, 17.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn non_positive_diameter_rejected() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    for d in [0.0, -110.0, f64::NAN] {
        let err = engine.resolve_pipe_spec("PE100", None, Some(17.0), d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}

#[test]
fn negative_length_rejected() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let err = engine.resolve_quantity(Some(-1.0), None, 110.0, 17.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn zero_length_with_unit_price_is_free() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let item = engine
        .price_pipe(&PipeRequest {
            grade: "PE100".into(),
            sdr: Some(17.0),
            diameter: 110.0,
            length: Some(0.0),
            unit_price: Some(dec!(50000)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(item.total_price(), Decimal::ZERO);
}

#[test]
fn huge_unit_price_is_rejected_not_panicking() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let unit_price =
        parse_money_field("price per kg", "79,228,162,514,264,337,593,543,950,335").unwrap();
    let err = engine
        .price_pipe(&PipeRequest {
            grade: "PE100".into(),
            sdr: Some(17.0),
            diameter: 110.0,
            length: Some(100.0),
            unit_price,
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(err.to_string(), "input error: amount out of range");
}

#[test]
fn huge_total_over_tiny_mass_is_rejected() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let err = engine
        .price_pipe(&PipeRequest {
            grade: "PE100".into(),
            sdr: Some(17.0),
            diameter: 110.0,
            length: Some(1e-12),
            total_price: Some(dec!(1000000000000000000)),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn overflowing_subtotal_blocks_finalize() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let mut draft = InvoiceDraft::new();
    for _ in 0..2 {
        draft.add(LineItem::Fitting(FittingLine {
            fitting_type: "Electrofusion".into(),
            product: "Coupler".into(),
            size: "110".into(),
            pn: "16".into(),
            quantity: 1,
            unit_price: Decimal::MAX,
            total_price: Decimal::MAX,
        }));
    }
    let request = InvoiceRequest {
        customer_name: "Client".into(),
        ..Default::default()
    };
    let mut seq = MemorySequencer::new();
    let err = engine
        .finalize(&draft, &request, &mut seq, &pipebill::clock::LocalClock)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
    assert_eq!(seq.highest(), 0);
}

#[test]
fn fittings_without_catalog() {
    let engine = PricingEngine::new(small_tables(), Config::default());
    let err = engine
        .price_fitting(&FittingRequest {
            fitting_type: "Electrofusion".into(),
            product: "Coupler".into(),
            size: "110".into(),
            quantity: 1,
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ---------------------------------------------------------------------------
// Discounts and totals
// ---------------------------------------------------------------------------

fn shipped_schedule() -> DiscountSchedule {
    DiscountSchedule::from_reader("100,2\n500,4\n700,6\n".as_bytes()).unwrap()
}

#[test]
fn tiered_at_each_threshold() {
    let s = shipped_schedule();
    assert_eq!(tiered_discount(&s, dec!(100)), dec!(0));
    assert_eq!(tiered_discount(&s, dec!(500)), dec!(8));
    assert_eq!(tiered_discount(&s, dec!(700)), dec!(16));
    assert_eq!(tiered_discount(&s, dec!(800)), dec!(22));
}

#[test]
fn breakdown_sums_to_discount() {
    let s = shipped_schedule();
    let shares = tiered_breakdown(&s, dec!(800));
    let sum: Decimal = shares.iter().map(|b| b.amount).sum();
    assert_eq!(sum, dec!(22));
    assert_eq!(shares.last().unwrap().to, dec!(800));
}

#[test]
fn custom_boundary_at_one_hundred() {
    assert_eq!(custom_discount(dec!(100), dec!(5000)).unwrap(), dec!(5000));
    assert_eq!(custom_discount(dec!(100.01), dec!(5000)).unwrap(), dec!(100.01));
}

#[test]
fn zero_subtotal() {
    let t = compute_totals(Decimal::ZERO, &DiscountMode::Custom(dec!(500)), Some(dec!(0.10)))
        .unwrap();
    assert_eq!(t, Totals::undiscounted(Decimal::ZERO));
}

#[test]
fn zero_rate_surcharge() {
    let t = compute_totals(dec!(1000), &DiscountMode::None, Some(Decimal::ZERO)).unwrap();
    assert_eq!(t.grand_total, dec!(1000));
}

#[test]
fn discount_before_surcharge_not_after() {
    // With an absolute discount the two orders give different totals.
    let t = compute_totals(dec!(1000), &DiscountMode::Custom(dec!(200)), Some(dec!(0.10)))
        .unwrap();
    assert_eq!(t.grand_total, dec!(880));
    assert_ne!(t.grand_total, dec!(1000) * dec!(1.10) - dec!(200));
}
