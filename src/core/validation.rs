use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Validate a document before issuance.
/// Returns all validation errors found (not just the first).
///
/// Payment-schedule consistency is deliberately absent: it is reported as
/// warnings by [`super::validate_schedule`].
pub fn validate_document(document: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if document.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "document number must not be empty",
            "DOC-NUMBER",
        ));
    }

    if document.currency_code.len() != 3
        || !document.currency_code.chars().all(|c| c.is_ascii_uppercase())
    {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!(
                "currency code '{}' must be 3 uppercase letters (ISO 4217)",
                document.currency_code
            ),
            "DOC-CURRENCY",
        ));
    }

    if document.client.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "client.name",
            "client name must not be empty",
            "DOC-CLIENT",
        ));
    }

    if document.lines.is_empty() && !document.is_draft() {
        errors.push(ValidationError::with_rule(
            "lines",
            format!("a {} document needs at least one line", document.status_str()),
            "DOC-LINES",
        ));
    }

    for (i, line) in document.lines.iter().enumerate() {
        if line.designation.trim().is_empty() {
            errors.push(ValidationError::with_rule(
                format!("lines[{i}].designation"),
                "designation must not be empty",
                "LINE-DESIGNATION",
            ));
        }
        validate_line_amounts(line, i, &mut errors);
    }

    for (i, entry) in document.payment_schedule.iter().enumerate() {
        validate_schedule_entry(entry, i, &mut errors);
    }

    match &document.kind {
        DocumentKind::Invoice {
            due_date,
            amount_paid,
            ..
        } => {
            if let Some(due) = due_date {
                if *due < document.issue_date {
                    errors.push(ValidationError::with_rule(
                        "due_date",
                        format!(
                            "due date {due} is before issue date {}",
                            document.issue_date
                        ),
                        "DOC-DATES",
                    ));
                }
            }
            if *amount_paid < Decimal::ZERO {
                errors.push(ValidationError::with_rule(
                    "amount_paid",
                    "amount paid must not be negative",
                    "PAID-NEG",
                ));
            }
        }
        DocumentKind::Quote { valid_until, .. } => {
            if *valid_until < document.issue_date {
                errors.push(ValidationError::with_rule(
                    "valid_until",
                    format!(
                        "validity date {valid_until} is before issue date {}",
                        document.issue_date
                    ),
                    "DOC-DATES",
                ));
            }
        }
    }

    errors
}

/// Check the numeric fields of a line: quantity > 0, unit price >= 0,
/// VAT rate within 0..=100.
pub(crate) fn validate_line_amounts(
    line: &LineItem,
    index: usize,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("lines[{index}]");

    if line.quantity <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            format!("quantity must be positive, got {}", line.quantity),
            "LINE-QTY",
        ));
    }

    if line.unit_price_ht < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price_ht"),
            format!("unit price must not be negative, got {}", line.unit_price_ht),
            "LINE-PRICE",
        ));
    }

    if line.vat_rate < Decimal::ZERO || line.vat_rate > dec!(100) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.vat_rate"),
            format!("VAT rate must be between 0 and 100, got {}", line.vat_rate),
            "LINE-VAT",
        ));
    }
}

fn validate_schedule_entry(
    entry: &PaymentScheduleEntry,
    index: usize,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("payment_schedule[{index}]");

    if entry.label.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.label"),
            "installment label must not be empty",
            "SCHED-LABEL",
        ));
    }

    if entry.percentage < Decimal::ZERO || entry.percentage > dec!(100) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.percentage"),
            format!(
                "installment percentage must be between 0 and 100, got {}",
                entry.percentage
            ),
            "SCHED-PCT",
        ));
    }

    if entry.amount < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.amount"),
            "installment amount must not be negative",
            "SCHED-AMOUNT",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use chrono::NaiveDate;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn test_client() -> ClientProfile {
        ClientBuilder::new("Centre Hospitalier de Lyon").build()
    }

    fn test_line() -> LineItem {
        LineItemBuilder::new("Formation SST", dec!(2), dec!(650)).build()
    }

    fn rules(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().filter_map(|e| e.rule.as_deref()).collect()
    }

    #[test]
    fn valid_invoice_has_no_errors() {
        let doc = DocumentBuilder::invoice("FAC-2024-001", test_date())
            .client(test_client())
            .add_line(test_line())
            .build_unchecked()
            .unwrap();
        assert!(validate_document(&doc).is_empty());
    }

    #[test]
    fn collects_every_line_problem() {
        let doc = DocumentBuilder::invoice("FAC-2024-002", test_date())
            .client(test_client())
            .add_line(LineItemBuilder::new("", dec!(0), dec!(-5)).vat_rate(dec!(120)).build())
            .build_unchecked()
            .unwrap();
        let errors = validate_document(&doc);
        assert_eq!(
            rules(&errors),
            vec!["LINE-DESIGNATION", "LINE-QTY", "LINE-PRICE", "LINE-VAT"]
        );
        assert_eq!(errors[1].field, "lines[0].quantity");
    }

    #[test]
    fn empty_number_and_client() {
        let doc = DocumentBuilder::invoice("  ", test_date())
            .client(ClientBuilder::new("").build())
            .add_line(test_line())
            .build_unchecked()
            .unwrap();
        assert_eq!(rules(&validate_document(&doc)), vec!["DOC-NUMBER", "DOC-CLIENT"]);
    }

    #[test]
    fn lowercase_currency_rejected() {
        let doc = DocumentBuilder::invoice("FAC-2024-003", test_date())
            .currency("eur")
            .client(test_client())
            .add_line(test_line())
            .build_unchecked()
            .unwrap();
        assert_eq!(rules(&validate_document(&doc)), vec!["DOC-CURRENCY"]);
    }

    #[test]
    fn due_date_before_issue_date() {
        let doc = DocumentBuilder::invoice("FAC-2024-004", test_date())
            .due_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .client(test_client())
            .add_line(test_line())
            .build_unchecked()
            .unwrap();
        let errors = validate_document(&doc);
        assert_eq!(rules(&errors), vec!["DOC-DATES"]);
        assert_eq!(errors[0].field, "due_date");
    }

    #[test]
    fn quote_validity_before_issue_date() {
        let doc = DocumentBuilder::quote(
            "DEV-2024-001",
            test_date(),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        )
        .client(test_client())
        .add_line(test_line())
        .build_unchecked()
        .unwrap();
        assert_eq!(rules(&validate_document(&doc)), vec!["DOC-DATES"]);
    }

    #[test]
    fn negative_amount_paid() {
        let doc = DocumentBuilder::invoice("FAC-2024-005", test_date())
            .amount_paid(dec!(-1))
            .client(test_client())
            .add_line(test_line())
            .build_unchecked()
            .unwrap();
        assert_eq!(rules(&validate_document(&doc)), vec!["PAID-NEG"]);
    }

    #[test]
    fn malformed_schedule_entry() {
        let doc = DocumentBuilder::invoice("FAC-2024-006", test_date())
            .client(test_client())
            .add_line(test_line())
            .add_installment(
                ScheduleEntryBuilder::new("", test_date(), dec!(150), dec!(-10)).build(),
            )
            .build_unchecked()
            .unwrap();
        assert_eq!(
            rules(&validate_document(&doc)),
            vec!["SCHED-LABEL", "SCHED-PCT", "SCHED-AMOUNT"]
        );
    }

    #[test]
    fn only_drafts_may_have_no_lines() {
        let draft = DocumentBuilder::quote("DEV-2024-002", test_date(), test_date())
            .client(test_client())
            .build_unchecked()
            .unwrap();
        assert!(validate_document(&draft).is_empty());

        let sent = DocumentBuilder::invoice("FAC-2024-008", test_date())
            .invoice_status(InvoiceStatus::Sent)
            .client(test_client())
            .build_unchecked()
            .unwrap();
        let errors = validate_document(&sent);
        assert_eq!(rules(&errors), vec!["DOC-LINES"]);
        assert_eq!(errors[0].field, "lines");
    }

    #[test]
    fn schedule_mismatch_is_not_an_error() {
        let doc = DocumentBuilder::invoice("FAC-2024-007", test_date())
            .client(test_client())
            .add_line(test_line())
            .add_installment(
                ScheduleEntryBuilder::new("Acompte", test_date(), dec!(40), dec!(10)).build(),
            )
            .build_unchecked()
            .unwrap();
        assert!(validate_document(&doc).is_empty());
    }
}
