//! Walk through a review session over an in-memory upstream payload.
//!
//! Run with: `RUST_LOG=debug cargo run --example review_session`

use facturator::core::*;
use facturator::payload::parse_batch;
use facturator::session::{ReviewSession, SubmissionOutcome};
use tracing_subscriber::EnvFilter;

const UPSTREAM: &str = r#"{
  "facturas": [
    {"id": "F-001", "NombreFiscalEmisor": "ACME CORP SL", "IdFiscalEmisor": "B12345678",
     "IdProveedor": "NOT FOUND", "Subcuenta": "NOT FOUND",
     "Base1": 1000, "Cuota1": 210, "Base2": 0, "Cuota2": 0, "Base3": 0, "Cuota3": 0,
     "RetencionIRPF": 150, "Total": 1060, "Tipo": "F1"},
    {"id": "F-002", "NombreFiscalEmisor": "Papelería Centro", "IdFiscalEmisor": "B99999999",
     "IdProveedor": "4000456", "Subcuenta": "6000456",
     "Base1": 80, "Cuota1": 16.8, "Base2": 0, "Cuota2": 0, "Base3": 0, "Cuota3": 0,
     "RetencionIRPF": 0, "Total": 96.8, "Tipo": "F1"}
  ],
  "proveedores": [
    {"IdFiscal": "B12345678", "IdProveedor": 4000123, "NombreFiscal": "ACME Corp", "Subcuenta": "6000123"},
    {"IdFiscal": "B99999999", "IdProveedor": 4000456, "NombreFiscal": "Papelería Centro SL", "Subcuenta": "6000456"}
  ]
}"#;

fn print_state(session: &ReviewSession) {
    let view = session.view();
    let Some(record) = view.record else {
        println!("\nphase: {:?}, nothing to review", view.phase);
        return;
    };
    println!(
        "\n[{}/{}] {} ({:?})",
        view.position.unwrap_or(0) + 1,
        view.pending,
        record.id,
        view.phase
    );
    for (field, value) in record.fields() {
        println!("  {:<20} {}", field.key(), value);
    }
    if let Some(rates) = view.derived {
        println!(
            "  rates: {} / {} / {}  withholding: {}",
            rates.rate_1, rates.rate_2, rates.rate_3, rates.withholding_rate
        );
    }
    println!("  submittable: {}", view.gate.submittable());
    for v in view.gate.violations() {
        println!("    {v}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let batch = parse_batch(UPSTREAM).unwrap();
    let mut session = ReviewSession::from_batch(ReviewConfig::default(), batch);
    print_state(&session);

    // Resolve the issuer of the first record
    session.set_search_term("acme");
    for p in session.search_results() {
        println!("  candidate: {} ({})", p.name, p.provider_id);
    }
    session.select_search_result(0).unwrap();
    print_state(&session);

    // Sink accepts the first record
    let ticket = session.begin_submission().unwrap();
    match session.complete_submission(&ticket, Ok(())) {
        Ok(SubmissionOutcome::Committed(rec)) => println!("\ncommitted {}", rec.id),
        other => println!("\nunexpected: {other:?}"),
    }
    print_state(&session);

    // Sink fails once, then the retry goes through
    let ticket = session.begin_submission().unwrap();
    let outcome = session.complete_submission(&ticket, Err("HTTP 503".into()));
    println!("\nfirst attempt: {outcome:?}");
    let ticket = session.begin_submission().unwrap();
    let outcome = session.complete_submission(&ticket, Ok(()));
    println!("retry committed: {:?}", outcome.map(|o| o.is_committed()));
    print_state(&session);
}
