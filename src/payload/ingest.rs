use serde_json::{Number, Value};
use tracing::warn;

use super::{DOCUMENT_KEY, STATUS_KEY};
use crate::core::{
    FieldKind, FieldName, FieldValue, InvoiceRecord, NOT_FOUND, Provider, RecordId, ReviewError,
    parse_amount,
};

/// Key of the invoice list in the upstream payload.
pub const INVOICES_KEY: &str = "facturas";

/// Key of the provider list in the upstream payload.
pub const PROVIDERS_KEY: &str = "proveedores";

const ID_KEYS: [&str; 3] = ["id", "Id", "ID"];

/// Result of the initial fetch: pending invoices plus the provider registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub invoices: Vec<InvoiceRecord>,
    pub providers: Vec<Provider>,
}

impl Batch {
    /// Read a batch from an already-parsed upstream value.
    ///
    /// Missing lists are empty; a value that is not an object is an empty
    /// batch.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            warn!("upstream payload is not an object; treating as empty");
            return Self::default();
        };

        let invoices = list(obj.get(INVOICES_KEY))
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                if v.is_object() {
                    Some(record_from_value(v, i))
                } else {
                    warn!(position = i, "skipping invoice entry that is not an object");
                    None
                }
            })
            .collect();

        let providers = list(obj.get(PROVIDERS_KEY))
            .iter()
            .filter_map(provider_from_value)
            .collect();

        Self {
            invoices,
            providers,
        }
    }
}

fn list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse raw upstream JSON.
///
/// # Errors
///
/// Returns [`ReviewError::Payload`] only if the text is not JSON at all.
pub fn parse_batch(json: &str) -> Result<Batch, ReviewError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ReviewError::Payload(e.to_string()))?;
    Ok(Batch::from_value(&value))
}

/// Build an invoice record from one upstream entry.
///
/// `position` names the record when the entry carries no ID.
pub fn record_from_value(value: &Value, position: usize) -> InvoiceRecord {
    let id = ID_KEYS
        .iter()
        .find_map(|k| value.get(k).and_then(scalar_text))
        .unwrap_or_else(|| {
            warn!(position, "invoice without ID");
            format!("record-{position}")
        });

    let mut record = InvoiceRecord::new(id);
    for field in FieldName::ALL {
        *record.get_mut(field) = coerce_value(field.kind(), value.get(field.key()));
    }
    record.status = value.get(STATUS_KEY).and_then(scalar_text);
    record.document_url = value.get(DOCUMENT_KEY).and_then(scalar_text);
    record
}

/// Build a provider from one upstream entry.
///
/// Returns `None` (and logs) if the entry has no usable numeric provider ID.
pub fn provider_from_value(value: &Value) -> Option<Provider> {
    let provider_id = match value.get("IdProveedor") {
        Some(Value::Number(n)) => number_text(n).parse::<u32>().ok(),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    let Some(provider_id) = provider_id else {
        warn!(entry = %value, "skipping provider without a numeric ID");
        return None;
    };

    let text = |key: &str| value.get(key).and_then(scalar_text).unwrap_or_default();
    let subaccount = value
        .get("Subcuenta")
        .and_then(scalar_text)
        .filter(|s| !s.is_empty() && s != NOT_FOUND);

    Some(Provider {
        tax_id: text("IdFiscal"),
        provider_id,
        name: text("NombreFiscal"),
        subaccount,
    })
}

fn coerce_value(kind: FieldKind, value: Option<&Value>) -> FieldValue {
    match value {
        None | Some(Value::Null) => FieldValue::Missing,
        Some(Value::String(s)) => FieldValue::coerce(kind, s),
        Some(Value::Number(n)) => {
            let text = number_text(n);
            match kind {
                FieldKind::Amount => match parse_amount(&text) {
                    Some(amount) => FieldValue::Amount(amount),
                    None => FieldValue::Text(text),
                },
                FieldKind::Text => FieldValue::Text(text),
            }
        }
        Some(Value::Bool(b)) => FieldValue::Text(b.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => FieldValue::Missing,
    }
}

/// Whole-valued floats print without a fraction (`4123456.0` reads `4123456`).
fn number_text(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
            return (f as i64).to_string();
        }
    }
    n.to_string()
}

/// Trimmed text of a string or number; `None` for anything else or blank.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => number_text(n),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
