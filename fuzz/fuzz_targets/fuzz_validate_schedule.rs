#![no_main]

use chrono::{Duration, NaiveDate};
use facture::core::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    // 9 bytes per entry: day offset, percentage (i32), amount (i32)
    let entries: Vec<PaymentScheduleEntry> = data
        .chunks_exact(9)
        .map(|c| {
            let word = |i: usize| i32::from_le_bytes([c[i], c[i + 1], c[i + 2], c[i + 3]]);
            ScheduleEntryBuilder::new(
                "fuzz",
                base + Duration::days(i64::from(c[0])),
                Decimal::new(word(1) as i64, 2),
                Decimal::new(word(5) as i64, 2),
            )
            .build()
        })
        .collect();

    let report = validate_schedule(Decimal::new(100, 0), &entries);
    assert_eq!(report.sorted_entries.len(), entries.len());
    for pair in report.sorted_entries.windows(2) {
        assert!(pair[0].due_date <= pair[1].due_date);
    }
});
