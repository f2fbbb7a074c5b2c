use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::config::FactureConfig;
use super::error::ValidationError;
use super::format::{format_amount, format_percentage};
use super::schedule::{ScheduleReport, validate_schedule_with};
use super::totals::{PaymentBalance, compute_totals, remaining_balance};
use super::types::*;
use super::urgency::{
    DueUrgency, QuoteUrgency, derive_due_urgency_with, derive_quote_urgency_with,
};

/// Everything the document renderer needs, computed once per render.
///
/// Organization, theme and configuration are explicit inputs: the renderer
/// never reaches for ambient state. The context borrows the document and
/// profiles and owns only computed data.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub document: &'a Document,
    pub organization: &'a OrganizationProfile,
    pub theme: &'a ThemeConfig,
    pub totals: DocumentTotals,
    /// Invoices only.
    pub balance: Option<PaymentBalance>,
    pub schedule: ScheduleReport,
    pub banner: Option<Banner>,
    pub formatted: FormattedTotals,
    pub rendered_on: NaiveDate,
}

/// Date-driven banner shown above the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Banner {
    Quote(QuoteUrgency),
    Due(DueUrgency),
}

/// Display strings for the totals block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTotals {
    pub total_ht: String,
    pub total_vat: String,
    pub total_ttc: String,
    pub amount_paid: Option<String>,
    pub remaining_balance: Option<String>,
    /// (rate, base HT, VAT) per VAT rate.
    pub vat_breakdown: Vec<(String, String, String)>,
}

impl<'a> RenderContext<'a> {
    /// Compute totals, balance, schedule report and banner for `document`.
    ///
    /// Fails only when a line or the paid amount is malformed; the caller is
    /// expected to render an error page rather than a partial document.
    pub fn build(
        document: &'a Document,
        organization: &'a OrganizationProfile,
        theme: &'a ThemeConfig,
        config: &FactureConfig,
        now: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let totals = compute_totals(&document.lines)?;

        let (balance, banner) = match &document.kind {
            DocumentKind::Invoice {
                status,
                due_date,
                amount_paid,
            } => {
                let balance = remaining_balance(&totals, *amount_paid)?;
                let banner = due_date
                    .filter(|_| status.is_open())
                    .map(|due| Banner::Due(derive_due_urgency_with(&config.urgency, due, now)));
                (Some(balance), banner)
            }
            DocumentKind::Quote {
                status,
                valid_until,
            } => {
                let banner = status.awaits_decision().then(|| {
                    Banner::Quote(derive_quote_urgency_with(&config.urgency, *valid_until, now))
                });
                (None, banner)
            }
        };

        // No installment plan: nothing to reconcile against the total
        let schedule = if document.payment_schedule.is_empty() {
            ScheduleReport::default()
        } else {
            validate_schedule_with(&config.schedule, totals.total_ttc, &document.payment_schedule)
        };

        let formatted = format_totals(&totals, balance.as_ref(), config);

        debug!(
            number = %document.number,
            status = document.status_str(),
            warnings = schedule.warnings.len(),
            "prepared render context"
        );

        Ok(Self {
            document,
            organization,
            theme,
            totals,
            balance,
            schedule,
            banner,
            formatted,
            rendered_on: now,
        })
    }

    /// Serialize the context for a template engine.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, super::error::FactureError> {
        serde_json::to_string(self).map_err(|e| {
            super::error::FactureError::Builder(format!("cannot serialize render context: {e}"))
        })
    }
}

fn format_totals(
    totals: &DocumentTotals,
    balance: Option<&PaymentBalance>,
    config: &FactureConfig,
) -> FormattedTotals {
    let fmt = &config.currency;
    FormattedTotals {
        total_ht: format_amount(totals.total_ht, fmt),
        total_vat: format_amount(totals.total_vat, fmt),
        total_ttc: format_amount(totals.total_ttc, fmt),
        amount_paid: balance.map(|b| format_amount(b.amount_paid, fmt)),
        remaining_balance: balance.map(|b| format_amount(b.remaining_balance, fmt)),
        vat_breakdown: totals
            .vat_breakdown
            .iter()
            .map(|b| {
                (
                    format_percentage(b.rate, fmt),
                    format_amount(b.base_ht, fmt),
                    format_amount(b.vat, fmt),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use crate::core::format::CurrencyFormat;
    use crate::core::schedule::ScheduleWarning;
    use crate::core::urgency::{DayBand, QuoteState};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn org() -> OrganizationProfile {
        OrganizationBuilder::new(
            "Form'Action SARL",
            AddressBuilder::new("Nantes", "44000", "FR").build(),
        )
        .training_declaration("52440000000")
        .build()
    }

    fn config() -> FactureConfig {
        FactureConfig {
            currency: CurrencyFormat {
                thousands_separator: " ".into(),
                ..CurrencyFormat::default()
            },
            ..FactureConfig::default()
        }
    }

    fn invoice(status: InvoiceStatus, paid: rust_decimal::Decimal) -> Document {
        DocumentBuilder::invoice("FAC-2024-010", date(2024, 6, 1))
            .due_date(date(2024, 6, 17))
            .invoice_status(status)
            .amount_paid(paid)
            .client(ClientBuilder::new("Mairie de Rezé").build())
            .add_line(LineItemBuilder::new("Formation Excel", dec!(2), dec!(100)).build())
            .add_installment(
                ScheduleEntryBuilder::new("Acompte", date(2024, 6, 10), dec!(50), dec!(120))
                    .paid()
                    .build(),
            )
            .add_installment(
                ScheduleEntryBuilder::new("Solde", date(2024, 6, 17), dec!(50), dec!(120)).build(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn invoice_context() {
        let doc = invoice(InvoiceStatus::PartiallyPaid, dec!(120));
        let org = org();
        let theme = ThemeConfig::default();
        let ctx = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 6, 15)).unwrap();

        assert_eq!(ctx.totals.total_ttc, dec!(240.00));
        let balance = ctx.balance.unwrap();
        assert_eq!(balance.remaining_balance, dec!(120.00));
        assert!(!ctx.schedule.has_warnings());
        assert_eq!(ctx.schedule.paid_amount, dec!(120));
        assert_eq!(
            ctx.banner,
            Some(Banner::Due(DueUrgency {
                band: DayBand::Urgent,
                days: 2
            }))
        );
        assert_eq!(ctx.formatted.total_ttc, "240,00 €");
        assert_eq!(ctx.formatted.remaining_balance.as_deref(), Some("120,00 €"));
        assert_eq!(
            ctx.formatted.vat_breakdown,
            vec![("20 %".to_string(), "200,00 €".to_string(), "40,00 €".to_string())]
        );
    }

    #[test]
    fn paid_invoice_has_no_banner() {
        let doc = invoice(InvoiceStatus::Paid, dec!(240));
        let org = org();
        let theme = ThemeConfig::default();
        let ctx = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 7, 1)).unwrap();
        assert!(ctx.banner.is_none());
        assert!(ctx.balance.unwrap().is_settled());
    }

    #[test]
    fn quote_context() {
        let doc = DocumentBuilder::quote("DEV-2024-003", date(2024, 6, 1), date(2024, 6, 30))
            .client(ClientBuilder::new("Mairie de Rezé").build())
            .add_line(LineItemBuilder::new("Audit", dec!(1), dec!(1500)).vat_exempt().build())
            .add_installment(
                ScheduleEntryBuilder::new("Acompte", date(2024, 7, 1), dec!(40), dec!(600)).build(),
            )
            .build()
            .unwrap();
        let org = org();
        let theme = ThemeConfig::default();
        let ctx = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 7, 2)).unwrap();

        assert!(ctx.balance.is_none());
        assert!(ctx.formatted.remaining_balance.is_none());
        assert_eq!(
            ctx.banner,
            Some(Banner::Quote(QuoteUrgency {
                state: QuoteState::Expired,
                days: -2
            }))
        );
        assert!(ctx.schedule.has_warning(ScheduleWarning::PercentageMismatch));
        assert!(ctx.schedule.has_warning(ScheduleWarning::AmountMismatch));
    }

    #[test]
    fn document_without_schedule_has_no_warnings() {
        let doc = DocumentBuilder::invoice("FAC-2024-011", date(2024, 6, 1))
            .client(ClientBuilder::new("Mairie de Rezé").build())
            .add_line(LineItemBuilder::new("Formation Word", dec!(1), dec!(450)).build())
            .build()
            .unwrap();
        let org = org();
        let theme = ThemeConfig::default();
        let ctx = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 6, 15)).unwrap();

        assert!(!ctx.schedule.has_warnings());
        assert!(ctx.schedule.sorted_entries.is_empty());
        assert_eq!(ctx.schedule.amount_sum, rust_decimal::Decimal::ZERO);
        assert_eq!(ctx.totals.total_ttc, dec!(540.00));
    }

    #[test]
    fn decided_quote_has_no_banner() {
        let org = org();
        let theme = ThemeConfig::default();
        for status in [QuoteStatus::Accepted, QuoteStatus::Rejected, QuoteStatus::Cancelled] {
            let doc = DocumentBuilder::quote("DEV-2024-004", date(2024, 6, 1), date(2024, 6, 30))
                .quote_status(status)
                .client(ClientBuilder::new("Mairie de Rezé").build())
                .add_line(LineItemBuilder::new("Audit", dec!(1), dec!(1500)).build())
                .build()
                .unwrap();
            let ctx = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 7, 2)).unwrap();
            assert!(ctx.banner.is_none(), "{status:?} quote should not carry a banner");
        }
    }

    #[test]
    fn malformed_legacy_line_fails_whole_render() {
        let doc = DocumentBuilder::invoice("FAC-2019-001", date(2019, 1, 1))
            .client(ClientBuilder::new("Ancien client").build())
            .add_line(LineItemBuilder::new("Ligne corrompue", dec!(1), dec!(10)).vat_rate(dec!(196)).build())
            .build_unchecked()
            .unwrap();
        let org = org();
        let theme = ThemeConfig::default();
        let err = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 1, 1)).unwrap_err();
        assert_eq!(err.field, "lines[0].vat_rate");
    }

    #[test]
    fn negative_paid_amount_fails_render() {
        let doc = DocumentBuilder::invoice("FAC-2019-002", date(2019, 1, 1))
            .amount_paid(dec!(-5))
            .client(ClientBuilder::new("Ancien client").build())
            .add_line(LineItemBuilder::new("Formation", dec!(1), dec!(10)).build())
            .build_unchecked()
            .unwrap();
        let org = org();
        let theme = ThemeConfig::default();
        let err = RenderContext::build(&doc, &org, &theme, &config(), date(2024, 1, 1)).unwrap_err();
        assert_eq!(err.rule.as_deref(), Some("PAID-NEG"));
    }
}
