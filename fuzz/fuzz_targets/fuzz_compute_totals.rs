#![no_main]

use facture::core::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    // 12 bytes per line: quantity, unit price, VAT rate as 32-bit mantissas
    let lines: Vec<LineItem> = data
        .chunks_exact(12)
        .map(|c| {
            let word = |i: usize| i32::from_le_bytes([c[i], c[i + 1], c[i + 2], c[i + 3]]);
            LineItemBuilder::new("fuzz", Decimal::new(word(0) as i64, 2), Decimal::new(word(4) as i64, 3))
                .vat_rate(Decimal::new(word(8) as i64 % 20_000, 2))
                .build()
        })
        .collect();

    // Must either fail cleanly or satisfy the totals identity.
    if let Ok(totals) = compute_totals(&lines) {
        assert_eq!(totals.total_ttc, totals.total_ht + totals.total_vat);
        let _ = remaining_balance(&totals, Decimal::new(i64::from(data.len() as u32), 0));
    }
});
