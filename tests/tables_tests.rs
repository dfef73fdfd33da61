use pipebill::core::*;
use pipebill::tables::*;
use rust_decimal_macros::dec;

fn config() -> Config {
    Config::with_data_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn tables() -> ReferenceTables {
    ReferenceTables::load(&config()).unwrap()
}

// --- Pipe series ---

#[test]
fn pe100_sdr17_is_pn10() {
    assert_eq!(tables().series.pn_for_grade_and_sdr("PE100", 17.0).unwrap(), 10.0);
}

#[test]
fn sdr_from_pn_per_grade() {
    let t = tables();
    assert_eq!(t.series.sdr_for_grade_and_pn("PE100", 16.0).unwrap(), 11.0);
    assert_eq!(t.series.sdr_for_grade_and_pn("PE80", 12.5).unwrap(), 11.0);
    assert_eq!(t.series.sdr_for_grade_and_pn("PE63", 10.0).unwrap(), 11.0);
    assert_eq!(t.series.sdr_for_grade_and_pn("PE100", 12.5).unwrap(), 13.6);
}

#[test]
fn grade_lookup_ignores_case_and_padding() {
    assert_eq!(tables().series.pn_for_grade_and_sdr(" pe80 ", 26.0).unwrap(), 5.0);
}

#[test]
fn unknown_grade_and_pn() {
    let t = tables();
    let err = t.series.pn_for_grade_and_sdr("PE40", 17.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("PE40"));

    let err = t.series.sdr_for_grade_and_pn("PE63", 32.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn blank_series_cell_is_data_error() {
    let err = tables().series.pn_for_grade_and_sdr("PE63", 6.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
}

#[test]
fn browse_series() {
    let t = tables();
    assert_eq!(t.series.grades(), vec!["PE100", "PE63", "PE80"]);
    assert_eq!(
        t.series.sdrs_for_grade("PE63").unwrap(),
        vec![7.4, 9.0, 11.0, 13.6, 17.0, 21.0, 26.0, 33.0, 41.0]
    );
    assert_eq!(
        t.series.pns_for_grade("PE100").unwrap(),
        vec![4.0, 5.0, 6.0, 8.0, 10.0, 12.5, 16.0, 20.0, 25.0, 32.0]
    );
}

// --- Weights ---

#[test]
fn weight_lookups() {
    let t = tables();
    assert_eq!(t.weights.mass_per_length(110.0, 17.0).unwrap(), 2.020);
    assert_eq!(t.weights.mass_per_length(90.0, 11.0).unwrap(), 2.019);
    assert_eq!(t.weights.mass_per_length(63.0, 9.0).unwrap(), 1.182);
    assert_eq!(t.weights.mass_per_length(160.0, 13.6).unwrap(), 5.260);
}

#[test]
fn small_diameters_in_thin_walls_are_not_made() {
    let t = tables();
    let err = t.weights.mass_per_length(20.0, 11.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
    assert_eq!(t.weights.mass_per_length(25.0, 11.0).unwrap(), 0.156);
}

#[test]
fn weight_keys_not_found() {
    let t = tables();
    assert_eq!(
        t.weights.mass_per_length(111.0, 17.0).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        t.weights.mass_per_length(110.0, 18.0).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn diameters_available_per_sdr() {
    let t = tables();
    let all = t.weights.diameters();
    assert_eq!(all.first(), Some(&20.0));
    assert_eq!(all.last(), Some(&400.0));
    assert_eq!(all.len(), 20);

    let sdr11 = t.weights.diameters_for_sdr(11.0);
    assert!(!sdr11.contains(&20.0));
    assert!(sdr11.contains(&25.0));
    assert!(t.weights.diameters_for_sdr(9.0).contains(&20.0));
}

// --- Discount schedule ---

#[test]
fn shipped_schedule() {
    let t = tables();
    assert_eq!(
        t.discounts.brackets(),
        &[
            Bracket::FLOOR,
            Bracket::new(dec!(100), dec!(2)),
            Bracket::new(dec!(500), dec!(4)),
            Bracket::new(dec!(700), dec!(6)),
        ]
    );
}

#[test]
fn missing_discount_file_means_no_steps() {
    let mut cfg = config();
    cfg.discount_file = "no_such_discount.csv".into();
    let t = ReferenceTables::load(&cfg).unwrap();
    assert!(t.discounts.is_flat());
}

#[test]
fn missing_series_file_is_io_error() {
    let mut cfg = config();
    cfg.series_file = "no_such_series.csv".into();
    let err = ReferenceTables::load(&cfg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

// --- Fittings catalog ---

#[test]
fn catalog_browse() {
    let t = tables();
    assert_eq!(
        t.fittings.types(),
        vec!["Electrofusion", "Butt Fusion", "Compression"]
    );
    assert_eq!(
        t.fittings.products("Butt Fusion"),
        vec!["Elbow 90", "Reducer", "Stub End"]
    );
    assert_eq!(t.fittings.sizes("Electrofusion", "Coupler"), vec!["63", "90", "110"]);
}

#[test]
fn catalog_row() {
    let row = tables().fittings.row("Butt Fusion", "Reducer", "110x90").unwrap();
    assert_eq!(row.unit_price, dec!(210000));
    assert_eq!(row.pn, "10");
    assert_eq!(row.extra["unit"], "pcs");
}

#[test]
fn missing_fittings_file_is_empty_catalog() {
    let mut cfg = config();
    cfg.fittings_file = "none.csv".into();
    let t = ReferenceTables::load(&cfg).unwrap();
    assert!(t.fittings.is_empty());
    assert_eq!(
        t.fittings.row("Electrofusion", "Coupler", "110").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}
