use facturator::core::*;
use facturator::registry::{ProviderRegistry, select};

fn registry() -> ProviderRegistry {
    ProviderRegistry::new(vec![
        Provider::new("B12345678", 4000123, "ACME Corp", Some("6000123")),
        Provider::new("B87654321", 4000456, "Other", None),
        Provider::new("A11111111", 4000789, "Suministros Acme Levante", Some("6000789")),
    ])
}

fn names(hits: Vec<&Provider>) -> Vec<String> {
    hits.into_iter().map(|p| p.name.clone()).collect()
}

#[test]
fn search_acme_over_two_providers() {
    let reg = ProviderRegistry::new(vec![
        Provider::new("B1", 4000001, "ACME Corp", None),
        Provider::new("B2", 4000002, "Other", None),
    ]);
    assert_eq!(names(reg.search("acme")), ["ACME Corp"]);
    assert!(reg.search("").is_empty());
}

#[test]
fn search_is_substring_not_prefix() {
    assert_eq!(
        names(registry().search("ACME")),
        ["ACME Corp", "Suministros Acme Levante"]
    );
    assert_eq!(names(registry().search("levan")), ["Suministros Acme Levante"]);
}

#[test]
fn search_miss_is_empty_not_error() {
    assert!(registry().search("Iberdrola").is_empty());
}

#[test]
fn search_is_not_fuzzy() {
    assert!(registry().search("acem").is_empty());
    assert!(registry().search("acme  corp").is_empty());
}

#[test]
fn select_overwrites_identity_and_keeps_amounts() {
    let reg = registry();
    let mut rec = InvoiceRecord::new("F-1")
        .with(FieldName::IssuerName, "ACME CORPORATION SL")
        .with(FieldName::IssuerTaxId, "NOT FOUND")
        .with(FieldName::ProviderId, "NOT FOUND")
        .with(FieldName::Subaccount, "NOT FOUND")
        .with(FieldName::Base1, "100")
        .with(FieldName::Total, "121");
    let hit = reg.search("acme corp")[0];
    select(&mut rec, hit);

    assert_eq!(rec.issuer_name.as_text(), "ACME Corp");
    assert_eq!(rec.issuer_tax_id.as_text(), "B12345678");
    assert_eq!(rec.provider_id.as_text(), "4000123");
    assert_eq!(rec.subaccount.as_text(), "6000123");
    assert_eq!(rec.base_1.amount(), Some(rust_decimal_macros::dec!(100)));
    assert!(provider_id_valid(&rec.provider_id.as_text()));
    assert!(subaccount_valid(&rec.subaccount.as_text()));
}

#[test]
fn select_provider_without_subaccount() {
    let reg = registry();
    let mut rec = InvoiceRecord::new("F-2").with(FieldName::Subaccount, "6999999");
    select(&mut rec, reg.get(4000456).unwrap());
    assert_eq!(rec.subaccount, FieldValue::NotFound);
    assert!(!subaccount_valid(&rec.subaccount.as_text()));
}

#[test]
fn selection_is_a_copy() {
    let reg = registry();
    let mut rec = InvoiceRecord::new("F-3");
    select(&mut rec, reg.get(4000123).unwrap());
    rec.set(FieldName::IssuerName, "edited afterwards");
    assert_eq!(reg.get(4000123).unwrap().name, "ACME Corp");
}
