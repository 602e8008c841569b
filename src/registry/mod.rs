//! Provider registry and resolution of free-text issuer names.
//!
//! Lookups are a linear scan over the providers in upstream order.
//!
//! # Example
//!
//! ```
//! use facturator::core::{FieldValue, InvoiceRecord, Provider};
//! use facturator::registry::{ProviderRegistry, select};
//!
//! let registry = ProviderRegistry::new(vec![
//!     Provider::new("B12345678", 4000123, "ACME Corp", Some("6000123")),
//!     Provider::new("B87654321", 4000456, "Other", None),
//! ]);
//! let hits = registry.search("acme");
//! assert_eq!(hits.len(), 1);
//!
//! let mut record = InvoiceRecord::new("inv-1");
//! select(&mut record, hits[0]);
//! assert_eq!(record.subaccount, FieldValue::Text("6000123".into()));
//! ```

mod index;
mod resolve;

pub use index::ProviderRegistry;
pub use resolve::select;
