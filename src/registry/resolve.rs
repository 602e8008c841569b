use tracing::debug;

use crate::core::{FieldValue, InvoiceRecord, Provider};

/// Copy a provider's identity onto a record.
///
/// Overwrites issuer name, issuer tax ID and provider ID, and sets the
/// sub-account to the provider's or to `NOT FOUND` when it has none. All four
/// values are computed before any field is written. No link to the provider
/// is kept.
pub fn select(record: &mut InvoiceRecord, provider: &Provider) {
    let issuer_name = FieldValue::Text(provider.name.clone());
    let issuer_tax_id = FieldValue::Text(provider.tax_id.clone());
    let provider_id = FieldValue::Text(provider.provider_id.to_string());
    let subaccount = match provider.subaccount.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => FieldValue::Text(code.to_string()),
        _ => FieldValue::NotFound,
    };

    record.issuer_name = issuer_name;
    record.issuer_tax_id = issuer_tax_id;
    record.provider_id = provider_id;
    record.subaccount = subaccount;
    debug!(record = %record.id, provider = provider.provider_id, "provider resolved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldName;

    #[test]
    fn overwrites_identity_fields() {
        let mut rec = InvoiceRecord::new("r")
            .with(FieldName::IssuerName, "ACME CORP S.L. (scan)")
            .with(FieldName::IssuerTaxId, "B1234567?")
            .with(FieldName::Total, "121");
        let provider = Provider::new("B12345678", 4000123, "ACME Corp", Some("6000123"));
        select(&mut rec, &provider);
        assert_eq!(rec.issuer_name, FieldValue::Text("ACME Corp".into()));
        assert_eq!(rec.issuer_tax_id, FieldValue::Text("B12345678".into()));
        assert_eq!(rec.provider_id, FieldValue::Text("4000123".into()));
        assert_eq!(rec.subaccount, FieldValue::Text("6000123".into()));
        // untouched
        assert_eq!(rec.total.as_text(), "121");
    }

    #[test]
    fn missing_subaccount_becomes_sentinel() {
        let mut rec = InvoiceRecord::new("r").with(FieldName::Subaccount, "6000001");
        select(&mut rec, &Provider::new("X", 4000001, "Other", None));
        assert_eq!(rec.subaccount, FieldValue::NotFound);

        select(&mut rec, &Provider::new("X", 4000001, "Other", Some("  ")));
        assert_eq!(rec.subaccount, FieldValue::NotFound);
    }
}
