use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use super::{DOCUMENT_KEY, STATUS_KEY};
use crate::core::{FieldValue, InvoiceRecord, NOT_FOUND};

/// JSON body sent to the submission sink for one record.
///
/// Uses the upstream keys so the sink sees the same shape it produced.
pub fn submission_payload(record: &InvoiceRecord) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), Value::String(record.id.to_string()));
    for (field, value) in record.fields() {
        map.insert(field.key().into(), field_json(value));
    }
    if let Some(status) = &record.status {
        map.insert(STATUS_KEY.into(), Value::String(status.clone()));
    }
    if let Some(url) = &record.document_url {
        map.insert(DOCUMENT_KEY.into(), Value::String(url.clone()));
    }
    Value::Object(map)
}

fn field_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Missing => Value::Null,
        FieldValue::NotFound => Value::String(NOT_FOUND.into()),
        FieldValue::Amount(d) => amount_json(*d),
        FieldValue::Text(s) => Value::String(s.clone()),
    }
}

/// Whole amounts as integers, the rest as floats; a string if neither fits.
fn amount_json(d: Decimal) -> Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Value::Number(i.into());
        }
    }
    d.to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldName;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn amounts_and_sentinels() {
        let mut rec = InvoiceRecord::new("inv-9")
            .with(FieldName::Base1, "100.00")
            .with(FieldName::Quota1, "21.5")
            .with(FieldName::Subaccount, "NOT FOUND");
        rec.status = Some("pending".into());
        let payload = submission_payload(&rec);
        assert_eq!(payload["id"], json!("inv-9"));
        assert_eq!(payload["Base1"], json!(100));
        assert_eq!(payload["Cuota1"], json!(21.5));
        assert_eq!(payload["Subcuenta"], json!("NOT FOUND"));
        assert_eq!(payload["Total"], Value::Null);
        assert_eq!(payload["Status"], json!("pending"));
        assert!(payload.get("DocumentoMarcaAgua").is_none());
    }

    #[test]
    fn huge_whole_amount_falls_back() {
        let v = amount_json(dec!(79228162514264337593543950335));
        assert!(v.is_number() || v.is_string());
    }
}
