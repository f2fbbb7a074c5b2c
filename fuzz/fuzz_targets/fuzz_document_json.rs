#![no_main]

use chrono::NaiveDate;
use facture::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → render must not panic at any step.
        if let Ok(document) = Document::from_json(s) {
            let _ = validate_document(&document);
            let org = OrganizationBuilder::new(
                "Fuzz",
                AddressBuilder::new("Paris", "75001", "FR").build(),
            )
            .build();
            let theme = ThemeConfig::default();
            let now = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
            if let Ok(ctx) = RenderContext::build(&document, &org, &theme, &FactureConfig::default(), now) {
                let _ = ctx.to_json();
            }
        }
    }
});
