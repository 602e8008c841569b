#![no_main]

use facturator::core::{ReviewConfig, derive_rates, evaluate};
use facturator::payload::{parse_batch, submission_payload};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(batch) = parse_batch(s) {
            let config = ReviewConfig::default();
            for record in &batch.invoices {
                let _ = derive_rates(record, &config);
                let _ = evaluate(record, &config);
                let _ = submission_payload(record);
            }
        }
    }
});
