#![no_main]

use libfuzzer_sys::fuzz_target;
use pipebill::tables::*;

fuzz_target!(|input: (&str, f64, f64)| {
    let (text, a, b) = input;
    if let Ok(series) = PipeSeriesTable::from_reader(text.as_bytes()) {
        for grade in series.grades() {
            let _ = series.pn_for_grade_and_sdr(grade, a);
            let _ = series.sdr_for_grade_and_pn(grade, b);
            let _ = series.sdrs_for_grade(grade);
        }
    }
    if let Ok(weights) = WeightTable::from_reader(text.as_bytes()) {
        let _ = weights.mass_per_length(a, b);
        let _ = weights.diameters_for_sdr(b);
    }
});
