//! # facturator
//!
//! Review engine for machine-extracted invoices: derive tax-rate ratios,
//! check that the stated total adds up, resolve the issuer against a
//! provider registry, and gate submission until the record is consistent.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The crate performs no I/O of its own; fetch and commit are supplied by the
//! caller through [`session::InvoiceSource`] and [`session::SubmissionSink`]
//! (or the optional `remote` feature).
//!
//! ## Quick Start
//!
//! ```rust
//! use facturator::core::*;
//! use facturator::payload::parse_batch;
//! use facturator::session::ReviewSession;
//!
//! let batch = parse_batch(r#"{
//!     "facturas": [{
//!         "id": "F-001", "NombreFiscalEmisor": "acme corp s.l.",
//!         "Base1": 100, "Cuota1": 21, "Base2": 0, "Cuota2": 0,
//!         "Base3": 0, "Cuota3": 0, "RetencionIRPF": 0, "Total": 121
//!     }],
//!     "proveedores": [{
//!         "IdFiscal": "B12345678", "IdProveedor": 4000123,
//!         "NombreFiscal": "ACME Corp", "Subcuenta": "6000123"
//!     }]
//! }"#).unwrap();
//!
//! let mut session = ReviewSession::from_batch(ReviewConfig::default(), batch);
//! assert!(!session.gate().submittable());
//!
//! session.set_search_term("acme");
//! assert_eq!(session.search_results()[0].provider_id, 4000123);
//! session.select_search_result(0).unwrap();
//!
//! assert!(session.gate().submittable());
//! assert_eq!(session.derived().unwrap().rate_1, rust_decimal_macros::dec!(0.21));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record model, rates, gate, registry, session, payload |
//! | `remote` | HTTP fetch/submit collaborators (reqwest) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod payload;

#[cfg(feature = "core")]
pub mod registry;

#[cfg(feature = "core")]
pub mod session;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
