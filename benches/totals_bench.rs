use chrono::{Duration, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use facture::core::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn lines(count: usize) -> Vec<LineItem> {
    (1..=count)
        .map(|i| {
            LineItemBuilder::new(format!("Module {i}"), dec!(2), dec!(9.99))
                .vat_rate(if i % 3 == 0 { dec!(5.5) } else { dec!(20) })
                .build()
        })
        .collect()
}

fn build_10_line_invoice() -> Document {
    let mut builder = DocumentBuilder::invoice("BENCH-001", test_date())
        .due_date(test_date() + Duration::days(30))
        .client(ClientBuilder::new("Clinique du Parc").build());
    for line in lines(10) {
        builder = builder.add_line(line);
    }
    for i in 0..4 {
        builder = builder.add_installment(
            ScheduleEntryBuilder::new(
                format!("Échéance {}", i + 1),
                test_date() + Duration::days(30 * i),
                dec!(25),
                dec!(14.49),
            )
            .build(),
        );
    }
    builder.build().unwrap()
}

fn bench_compute_totals(c: &mut Criterion) {
    let small = lines(10);
    c.bench_function("compute_totals_10_lines", |b| {
        b.iter(|| black_box(compute_totals(black_box(&small))));
    });

    let big = lines(1000);
    c.bench_function("compute_totals_1000_lines", |b| {
        b.iter(|| black_box(compute_totals(black_box(&big))));
    });
}

fn bench_validate_schedule(c: &mut Criterion) {
    let entries: Vec<PaymentScheduleEntry> = (0..120)
        .rev()
        .map(|i| {
            ScheduleEntryBuilder::new(
                format!("Mensualité {i}"),
                test_date() + Duration::days(i),
                dec!(100) / dec!(120),
                dec!(10),
            )
            .build()
        })
        .collect();
    c.bench_function("validate_schedule_120_entries", |b| {
        b.iter(|| black_box(validate_schedule(black_box(dec!(1200)), black_box(&entries))));
    });
}

fn bench_render_context(c: &mut Criterion) {
    let doc = build_10_line_invoice();
    let org = OrganizationBuilder::new(
        "Bench Formation",
        AddressBuilder::new("Nantes", "44000", "FR").build(),
    )
    .build();
    let theme = ThemeConfig::default();
    let config = FactureConfig::default();
    c.bench_function("render_context_10_lines", |b| {
        b.iter(|| {
            black_box(RenderContext::build(
                black_box(&doc),
                &org,
                &theme,
                &config,
                test_date(),
            ))
        });
    });
}

fn bench_format_amount(c: &mut Criterion) {
    let format = CurrencyFormat::default();
    let value = Decimal::new(123_456_789, 2);
    c.bench_function("format_amount", |b| {
        b.iter(|| black_box(format_amount(black_box(value), &format)));
    });
}

criterion_group!(
    benches,
    bench_compute_totals,
    bench_validate_schedule,
    bench_render_context,
    bench_format_amount,
);
criterion_main!(benches);
