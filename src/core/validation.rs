use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::{PROVIDER_ID_PATTERN, ReviewConfig, SUBACCOUNT_PATTERN};
use super::error::ValidationError;
use super::types::{FieldName, FieldValue, InvoiceRecord};

/// Outcome of the submission gate for one record.
///
/// Each check is reported separately so the caller can highlight the
/// offending fields; [`submittable`](Self::submittable) combines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    /// Stated total matches bases + quotas - withholding within tolerance.
    pub total_consistent: bool,
    /// Provider ID has the configured shape.
    pub provider_id_valid: bool,
    /// Sub-account has the configured shape.
    pub subaccount_valid: bool,
}

impl GateReport {
    /// Report for "nothing to submit": every check fails.
    pub fn blocked() -> Self {
        Self {
            total_consistent: false,
            provider_id_valid: false,
            subaccount_valid: false,
        }
    }

    pub fn submittable(&self) -> bool {
        self.total_consistent && self.provider_id_valid && self.subaccount_valid
    }

    /// One validation error per failed check, in field display order.
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.provider_id_valid {
            errors.push(ValidationError::with_rule(
                FieldName::ProviderId.key(),
                "provider ID does not have the required format",
                "provider-id-format",
            ));
        }
        if !self.subaccount_valid {
            errors.push(ValidationError::with_rule(
                FieldName::Subaccount.key(),
                "sub-account does not have the required format",
                "subaccount-format",
            ));
        }
        if !self.total_consistent {
            errors.push(ValidationError::with_rule(
                FieldName::Total.key(),
                "total does not match bases + quotas - withholding",
                "total-consistency",
            ));
        }
        errors
    }
}

/// Run every gate check against a record.
pub fn evaluate(record: &InvoiceRecord, config: &ReviewConfig) -> GateReport {
    GateReport {
        total_consistent: total_consistent_within(record, config.total_tolerance),
        provider_id_valid: config
            .provider_id_pattern
            .matches(&record.provider_id.as_text()),
        subaccount_valid: config
            .subaccount_pattern
            .matches(&record.subaccount.as_text()),
    }
}

/// Gate for an optional current record; no record means not submittable.
pub fn evaluate_current(record: Option<&InvoiceRecord>, config: &ReviewConfig) -> GateReport {
    match record {
        Some(record) => evaluate(record, config),
        None => GateReport::blocked(),
    }
}

/// `base_1 + base_2 + base_3 + quota_1 + quota_2 + quota_3 - withholding`.
///
/// `None` if any operand is not an amount, which fails the consistency check.
pub fn expected_total(record: &InvoiceRecord) -> Option<Decimal> {
    let parts: [&FieldValue; 6] = [
        &record.base_1,
        &record.base_2,
        &record.base_3,
        &record.quota_1,
        &record.quota_2,
        &record.quota_3,
    ];
    let mut sum = Decimal::ZERO;
    for part in parts {
        sum = sum.checked_add(part.amount()?)?;
    }
    sum.checked_sub(record.withholding.amount()?)
}

/// Total-consistency check with the default tolerance.
pub fn total_consistent(record: &InvoiceRecord) -> bool {
    total_consistent_within(record, ReviewConfig::default().total_tolerance)
}

/// `|total - expected_total| < tolerance`; false if any operand is unparsable.
pub fn total_consistent_within(record: &InvoiceRecord, tolerance: Decimal) -> bool {
    let (Some(total), Some(expected)) = (record.total.amount(), expected_total(record)) else {
        return false;
    };
    total
        .checked_sub(expected)
        .is_some_and(|diff| diff.abs() < tolerance)
}

/// Provider ID shape check with the default pattern.
pub fn provider_id_valid(value: &str) -> bool {
    PROVIDER_ID_PATTERN.matches(value)
}

/// Sub-account shape check with the default pattern.
pub fn subaccount_valid(value: &str) -> bool {
    SUBACCOUNT_PATTERN.matches(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balanced(total: &str) -> InvoiceRecord {
        InvoiceRecord::new("r")
            .with(FieldName::Base1, "100")
            .with(FieldName::Quota1, "21")
            .with(FieldName::Base2, "0")
            .with(FieldName::Quota2, "0")
            .with(FieldName::Base3, "0")
            .with(FieldName::Quota3, "0")
            .with(FieldName::Withholding, "0")
            .with(FieldName::Total, total)
    }

    #[test]
    fn consistent_total() {
        assert!(total_consistent(&balanced("121")));
        assert!(!total_consistent(&balanced("120")));
        assert_eq!(expected_total(&balanced("121")), Some(dec!(121)));
    }

    #[test]
    fn tolerance_is_strict() {
        assert!(total_consistent(&balanced("121.009")));
        assert!(!total_consistent(&balanced("121.01")));
        assert!(total_consistent(&balanced("120.991")));
    }

    #[test]
    fn withholding_is_subtracted() {
        let rec = balanced("106").with(FieldName::Withholding, "15");
        assert!(total_consistent(&rec));
    }

    #[test]
    fn any_unparsable_operand_fails() {
        for field in [
            FieldName::Base1,
            FieldName::Quota1,
            FieldName::Base2,
            FieldName::Quota2,
            FieldName::Base3,
            FieldName::Quota3,
            FieldName::Withholding,
            FieldName::Total,
        ] {
            let rec = balanced("121").with(field, "x");
            assert!(!total_consistent(&rec), "{field} unparsable should fail");
            let rec = balanced("121").with(field, "");
            assert!(!total_consistent(&rec), "{field} missing should fail");
        }
    }

    #[test]
    fn empty_record_fails_every_check() {
        let report = evaluate(&InvoiceRecord::new("r"), &ReviewConfig::default());
        assert_eq!(report, GateReport::blocked());
        assert_eq!(report.violations().len(), 3);
    }

    #[test]
    fn format_checks() {
        assert!(provider_id_valid("4123456"));
        assert!(!provider_id_valid("412345"));
        assert!(!provider_id_valid("5123456"));
        assert!(subaccount_valid("6000001"));
        assert!(!subaccount_valid("NOT FOUND"));
    }

    #[test]
    fn full_gate_passes() {
        let rec = balanced("121")
            .with(FieldName::ProviderId, "4123456")
            .with(FieldName::Subaccount, "6000001");
        let report = evaluate(&rec, &ReviewConfig::default());
        assert!(report.submittable());
        assert!(report.violations().is_empty());
    }

    #[test]
    fn violations_name_the_failed_field() {
        let rec = balanced("121")
            .with(FieldName::ProviderId, "5123456")
            .with(FieldName::Subaccount, "6000001");
        let report = evaluate(&rec, &ReviewConfig::default());
        assert!(!report.submittable());
        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "IdProveedor");
        assert_eq!(violations[0].rule.as_deref(), Some("provider-id-format"));
    }

    #[test]
    fn no_current_record_is_blocked() {
        let report = evaluate_current(None, &ReviewConfig::default());
        assert!(!report.submittable());
    }
}
