use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::NOT_FOUND;

/// Opaque record identifier assigned by the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a field's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text or an identifier kept verbatim.
    Text,
    /// Monetary amount.
    Amount,
}

/// The fixed field vocabulary of an invoice record, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldName {
    /// Issuer's legal name.
    IssuerName,
    /// Issuer's tax identifier (NIF/CIF).
    IssuerTaxId,
    /// Provider code in the accounting system.
    ProviderId,
    /// Ledger sub-account associated with the provider.
    Subaccount,
    Base1,
    Quota1,
    Base2,
    Quota2,
    Base3,
    Quota3,
    /// Income tax withholding (IRPF).
    Withholding,
    Total,
    /// Invoice type.
    Kind,
}

impl FieldName {
    /// All fields in display order.
    pub const ALL: [FieldName; 13] = [
        Self::IssuerName,
        Self::IssuerTaxId,
        Self::ProviderId,
        Self::Subaccount,
        Self::Base1,
        Self::Quota1,
        Self::Base2,
        Self::Quota2,
        Self::Base3,
        Self::Quota3,
        Self::Withholding,
        Self::Total,
        Self::Kind,
    ];

    /// Key used by the upstream payload and the submission sink.
    pub fn key(&self) -> &'static str {
        match self {
            Self::IssuerName => "NombreFiscalEmisor",
            Self::IssuerTaxId => "IdFiscalEmisor",
            Self::ProviderId => "IdProveedor",
            Self::Subaccount => "Subcuenta",
            Self::Base1 => "Base1",
            Self::Quota1 => "Cuota1",
            Self::Base2 => "Base2",
            Self::Quota2 => "Cuota2",
            Self::Base3 => "Base3",
            Self::Quota3 => "Cuota3",
            Self::Withholding => "RetencionIRPF",
            Self::Total => "Total",
            Self::Kind => "Tipo",
        }
    }

    /// Parse from the wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Base1
            | Self::Quota1
            | Self::Base2
            | Self::Quota2
            | Self::Base3
            | Self::Quota3
            | Self::Withholding
            | Self::Total => FieldKind::Amount,
            Self::IssuerName
            | Self::IssuerTaxId
            | Self::ProviderId
            | Self::Subaccount
            | Self::Kind => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value of a single record field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Absent from the source or cleared by the operator.
    #[default]
    Missing,
    /// Known to be unresolved (the `NOT FOUND` sentinel).
    NotFound,
    /// A parsed monetary amount.
    Amount(Decimal),
    /// Trimmed text. In an amount field this is text that did not parse.
    Text(String),
}

impl FieldValue {
    /// Interpret raw operator or upstream text for a field of the given kind.
    pub fn coerce(kind: FieldKind, raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if trimmed == NOT_FOUND {
            return Self::NotFound;
        }
        match kind {
            FieldKind::Amount => match parse_amount(trimmed) {
                Some(amount) => Self::Amount(amount),
                None => Self::Text(trimmed.to_string()),
            },
            FieldKind::Text => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric reading of the value, `None` if it is not an amount.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(d) => Some(*d),
            Self::Text(s) => parse_amount(s),
            Self::Missing | Self::NotFound => None,
        }
    }

    /// Text as shown to the operator.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Missing => Cow::Borrowed(""),
            Self::NotFound => Cow::Borrowed(NOT_FOUND),
            Self::Amount(d) => Cow::Owned(d.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Parse a monetary amount written with a `.` decimal separator.
///
/// Scientific notation is accepted since some extractors emit it for large
/// values. Anything else is `None`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// An invoice record under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Upstream identifier.
    pub id: RecordId,
    pub issuer_name: FieldValue,
    pub issuer_tax_id: FieldValue,
    pub provider_id: FieldValue,
    pub subaccount: FieldValue,
    pub base_1: FieldValue,
    pub quota_1: FieldValue,
    pub base_2: FieldValue,
    pub quota_2: FieldValue,
    pub base_3: FieldValue,
    pub quota_3: FieldValue,
    pub withholding: FieldValue,
    pub total: FieldValue,
    pub kind: FieldValue,
    /// Upstream processing status, displayed but never interpreted.
    pub status: Option<String>,
    /// Link to the watermarked source document.
    pub document_url: Option<String>,
}

impl InvoiceRecord {
    /// A record with every field missing.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            issuer_name: FieldValue::Missing,
            issuer_tax_id: FieldValue::Missing,
            provider_id: FieldValue::Missing,
            subaccount: FieldValue::Missing,
            base_1: FieldValue::Missing,
            quota_1: FieldValue::Missing,
            base_2: FieldValue::Missing,
            quota_2: FieldValue::Missing,
            base_3: FieldValue::Missing,
            quota_3: FieldValue::Missing,
            withholding: FieldValue::Missing,
            total: FieldValue::Missing,
            kind: FieldValue::Missing,
            status: None,
            document_url: None,
        }
    }

    pub fn get(&self, field: FieldName) -> &FieldValue {
        match field {
            FieldName::IssuerName => &self.issuer_name,
            FieldName::IssuerTaxId => &self.issuer_tax_id,
            FieldName::ProviderId => &self.provider_id,
            FieldName::Subaccount => &self.subaccount,
            FieldName::Base1 => &self.base_1,
            FieldName::Quota1 => &self.quota_1,
            FieldName::Base2 => &self.base_2,
            FieldName::Quota2 => &self.quota_2,
            FieldName::Base3 => &self.base_3,
            FieldName::Quota3 => &self.quota_3,
            FieldName::Withholding => &self.withholding,
            FieldName::Total => &self.total,
            FieldName::Kind => &self.kind,
        }
    }

    pub fn get_mut(&mut self, field: FieldName) -> &mut FieldValue {
        match field {
            FieldName::IssuerName => &mut self.issuer_name,
            FieldName::IssuerTaxId => &mut self.issuer_tax_id,
            FieldName::ProviderId => &mut self.provider_id,
            FieldName::Subaccount => &mut self.subaccount,
            FieldName::Base1 => &mut self.base_1,
            FieldName::Quota1 => &mut self.quota_1,
            FieldName::Base2 => &mut self.base_2,
            FieldName::Quota2 => &mut self.quota_2,
            FieldName::Base3 => &mut self.base_3,
            FieldName::Quota3 => &mut self.quota_3,
            FieldName::Withholding => &mut self.withholding,
            FieldName::Total => &mut self.total,
            FieldName::Kind => &mut self.kind,
        }
    }

    /// Overwrite a field from raw text, coercing it for the field's kind.
    pub fn set(&mut self, field: FieldName, raw: &str) {
        *self.get_mut(field) = FieldValue::coerce(field.kind(), raw);
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, field: FieldName, raw: &str) -> Self {
        self.set(field, raw);
        self
    }

    /// Iterate fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        FieldName::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// A known provider. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Tax identifier (NIF/CIF).
    pub tax_id: String,
    /// Numeric provider code.
    pub provider_id: u32,
    /// Display name, matched by search.
    pub name: String,
    /// Ledger sub-account, if the provider has one.
    pub subaccount: Option<String>,
}

impl Provider {
    pub fn new(
        tax_id: impl Into<String>,
        provider_id: u32,
        name: impl Into<String>,
        subaccount: Option<&str>,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            provider_id,
            name: name.into(),
            subaccount: subaccount.map(str::to_string),
        }
    }
}
