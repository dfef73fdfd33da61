#![no_main]

use libfuzzer_sys::fuzz_target;
use pipebill::tables::*;

fuzz_target!(|data: &[u8]| {
    // Must not panic; errors are fine.
    let _ = PipeSeriesTable::from_reader(data);
    let _ = WeightTable::from_reader(data);
    let _ = DiscountSchedule::from_reader(data);
    let _ = FittingsCatalog::from_reader(data);
});
