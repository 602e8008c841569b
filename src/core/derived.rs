use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::config::ReviewConfig;
use super::types::{FieldValue, InvoiceRecord};

/// Tax-rate ratios shown next to the raw amounts. Never stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRates {
    /// `quota_1 / base_1`.
    pub rate_1: Decimal,
    /// `quota_2 / base_2`.
    pub rate_2: Decimal,
    /// `quota_3 / base_3`.
    pub rate_3: Decimal,
    /// `withholding / base_1`.
    pub withholding_rate: Decimal,
}

/// Compute the rate ratios of a record.
///
/// A base that is missing, unparsable or zero counts as `1`; a quota or
/// withholding that is missing or unparsable counts as `0`. The function is
/// total: it never divides by zero and never panics.
pub fn derive_rates(record: &InvoiceRecord, config: &ReviewConfig) -> DerivedRates {
    let dp = config.rate_decimals;
    DerivedRates {
        rate_1: ratio(&record.quota_1, &record.base_1, dp),
        rate_2: ratio(&record.quota_2, &record.base_2, dp),
        rate_3: ratio(&record.quota_3, &record.base_3, dp),
        withholding_rate: ratio(&record.withholding, &record.base_1, dp),
    }
}

fn ratio(numerator: &FieldValue, denominator: &FieldValue, dp: u32) -> Decimal {
    let num = numerator.amount().unwrap_or(Decimal::ZERO);
    let den = denominator
        .amount()
        .filter(|d| !d.is_zero())
        .unwrap_or(Decimal::ONE);
    // Overflow only happens for absurd magnitudes; show 0 rather than fail.
    num.checked_div(den)
        .map(|r| round_half_up(r, dp))
        .unwrap_or(Decimal::ZERO)
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
