//! The JSON boundary with the upstream source and the submission sink.
//!
//! Upstream payloads are loosely typed: values may be numbers, strings,
//! `null` or absent. Everything is coerced here, once, into the typed record
//! model so the rest of the crate never sees raw JSON. Ingestion is total: a
//! malformed entry degrades to missing fields or is skipped, it never fails
//! the batch.

mod ingest;
mod submit;

pub use ingest::{
    Batch, INVOICES_KEY, PROVIDERS_KEY, parse_batch, provider_from_value, record_from_value,
};
pub use submit::submission_payload;

/// Key of the upstream processing status.
pub const STATUS_KEY: &str = "Status";

/// Key of the watermarked document link.
pub const DOCUMENT_KEY: &str = "DocumentoMarcaAgua";
