use criterion::{Criterion, black_box, criterion_group, criterion_main};

use facturator::core::*;
use facturator::payload::{Batch, parse_batch, submission_payload};
use facturator::registry::ProviderRegistry;
use facturator::session::ReviewSession;

fn invoice(i: usize) -> InvoiceRecord {
    InvoiceRecord::new(format!("BENCH-{i:05}"))
        .with(FieldName::IssuerName, &format!("Proveedor {i} SL"))
        .with(FieldName::ProviderId, &format!("4{:06}", i % 1_000_000))
        .with(FieldName::Subaccount, &format!("6{:06}", i % 1_000_000))
        .with(FieldName::Base1, "1000.00")
        .with(FieldName::Quota1, "210.00")
        .with(FieldName::Base2, "200.00")
        .with(FieldName::Quota2, "20.00")
        .with(FieldName::Base3, "50.00")
        .with(FieldName::Quota3, "2.00")
        .with(FieldName::Withholding, "150.00")
        .with(FieldName::Total, "1332.00")
}

fn providers(n: usize) -> Vec<Provider> {
    (0..n)
        .map(|i| {
            Provider::new(
                format!("B{i:08}"),
                4_000_000 + i as u32,
                format!("Suministros Industriales {i} SL"),
                Some("6000001"),
            )
        })
        .collect()
}

fn bench_gate(c: &mut Criterion) {
    let rec = invoice(1);
    let config = ReviewConfig::default();
    c.bench_function("gate_evaluate", |b| {
        b.iter(|| black_box(evaluate(black_box(&rec), black_box(&config))));
    });
    c.bench_function("derive_rates", |b| {
        b.iter(|| black_box(derive_rates(black_box(&rec), black_box(&config))));
    });
}

fn bench_search(c: &mut Criterion) {
    let registry = ProviderRegistry::new(providers(5_000));
    c.bench_function("search_5000_providers", |b| {
        b.iter(|| black_box(registry.search(black_box("industriales 49"))));
    });
}

fn bench_session_drain(c: &mut Criterion) {
    let invoices: Vec<_> = (0..1_000).map(invoice).collect();
    c.bench_function("submit_1000_records", |b| {
        b.iter(|| {
            let mut session = ReviewSession::from_batch(
                ReviewConfig::default(),
                Batch {
                    invoices: invoices.clone(),
                    providers: Vec::new(),
                },
            );
            while let Ok(ticket) = session.begin_submission() {
                let _ = session.complete_submission(&ticket, Ok(()));
            }
            black_box(session.pending_count())
        });
    });
}

fn bench_payload(c: &mut Criterion) {
    let invoices: Vec<_> = (0..500).map(|i| submission_payload(&invoice(i))).collect();
    let body = serde_json::json!({ "facturas": invoices, "proveedores": [] }).to_string();
    c.bench_function("parse_batch_500_invoices", |b| {
        b.iter(|| black_box(parse_batch(black_box(&body))));
    });
}

criterion_group!(
    benches,
    bench_gate,
    bench_search,
    bench_session_drain,
    bench_payload,
);
criterion_main!(benches);
