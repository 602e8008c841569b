#![no_main]

use facturator::core::{FieldName, InvoiceRecord, ReviewConfig, derive_rates, evaluate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    if let Ok(raw) = std::str::from_utf8(rest) {
        let field = FieldName::ALL[selector as usize % FieldName::ALL.len()];
        let record = InvoiceRecord::new("fuzz").with(field, raw);
        let config = ReviewConfig::default();
        let _ = derive_rates(&record, &config);
        let _ = evaluate(&record, &config);
    }
});
