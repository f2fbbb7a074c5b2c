//! HT/TVA/TTC arithmetic.
//!
//! Rounding follows French invoicing practice: each line's HT and VAT are
//! rounded half-up to the cent, and document totals are exact sums of those
//! rounded figures. Aggregates are never rounded again.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ValidationError;
use super::types::*;
use super::validation::validate_line_amounts;

/// Compute line and document totals.
///
/// Fails on the first malformed line (quantity <= 0, negative unit price,
/// VAT rate outside 0..=100). Partial totals are never returned. An empty
/// slice yields zero totals.
pub fn compute_totals(lines: &[LineItem]) -> Result<DocumentTotals, ValidationError> {
    for (i, line) in lines.iter().enumerate() {
        let mut errors = Vec::new();
        validate_line_amounts(line, i, &mut errors);
        if let Some(first) = errors.into_iter().next() {
            return Err(first);
        }
    }

    let line_totals = lines
        .iter()
        .enumerate()
        .map(|(i, line)| compute_line(line).ok_or_else(|| overflow(format!("lines[{i}]"))))
        .collect::<Result<Vec<_>, _>>()?;

    let total_ht = checked_sum(line_totals.iter().map(|l| l.total_ht))
        .ok_or_else(|| overflow("total_ht".into()))?;
    let total_vat = checked_sum(line_totals.iter().map(|l| l.vat))
        .ok_or_else(|| overflow("total_vat".into()))?;
    let total_ttc = total_ht
        .checked_add(total_vat)
        .ok_or_else(|| overflow("total_ttc".into()))?;

    // BTreeMap keeps the breakdown sorted by rate
    let mut groups: BTreeMap<Decimal, (Decimal, Decimal)> = BTreeMap::new();
    for (line, totals) in lines.iter().zip(&line_totals) {
        let entry = groups
            .entry(line.vat_rate.normalize())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += totals.total_ht;
        entry.1 += totals.vat;
    }
    let vat_breakdown = groups
        .into_iter()
        .map(|(rate, (base_ht, vat))| VatBreakdown { rate, base_ht, vat })
        .collect();

    debug!(
        lines = lines.len(),
        %total_ht,
        %total_vat,
        %total_ttc,
        "computed document totals"
    );

    Ok(DocumentTotals {
        lines: line_totals,
        total_ht,
        total_vat,
        total_ttc,
        vat_breakdown,
    })
}

/// Figures for a single, already validated line.
/// Returns `None` if the amounts overflow the decimal range.
pub fn compute_line(line: &LineItem) -> Option<LineTotals> {
    let total_ht = round_half_up(line.quantity.checked_mul(line.unit_price_ht)?, 2);
    let vat = round_half_up(
        total_ht.checked_mul(line.vat_rate)?.checked_div(dec!(100))?,
        2,
    );
    Some(LineTotals {
        total_ht,
        vat,
        total_ttc: total_ht.checked_add(vat)?,
    })
}

fn checked_sum(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |acc, v| acc?.checked_add(v))
}

fn overflow(field: String) -> ValidationError {
    ValidationError::with_rule(field, "amount exceeds the supported decimal range", "AMOUNT-RANGE")
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// What is left to pay on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBalance {
    pub total_ttc: Decimal,
    pub amount_paid: Decimal,
    /// total_ttc - amount_paid; negative when the client paid too much.
    pub remaining_balance: Decimal,
    /// Amount paid beyond total_ttc, zero otherwise.
    pub overpayment: Decimal,
    /// Share of the TTC already paid, in percent (2 dp).
    pub paid_ratio: Decimal,
}

impl PaymentBalance {
    pub fn is_settled(&self) -> bool {
        self.remaining_balance <= Decimal::ZERO
    }

    pub fn is_overpaid(&self) -> bool {
        self.overpayment > Decimal::ZERO
    }
}

/// Compute the remaining balance of an invoice.
///
/// A negative `amount_paid` is rejected. Over-payment is accepted and
/// reported through [`PaymentBalance::overpayment`].
pub fn remaining_balance(
    totals: &DocumentTotals,
    amount_paid: Decimal,
) -> Result<PaymentBalance, ValidationError> {
    if amount_paid < Decimal::ZERO {
        return Err(ValidationError::with_rule(
            "amount_paid",
            format!("amount paid must not be negative, got {amount_paid}"),
            "PAID-NEG",
        ));
    }

    let remaining = totals.total_ttc - amount_paid;
    let overpayment = if remaining < Decimal::ZERO {
        -remaining
    } else {
        Decimal::ZERO
    };
    let paid_ratio = if totals.total_ttc.is_zero() {
        Decimal::ZERO
    } else {
        amount_paid
            .checked_mul(dec!(100))
            .and_then(|v| v.checked_div(totals.total_ttc))
            .map(|ratio| round_half_up(ratio, 2))
            .ok_or_else(|| overflow("amount_paid".into()))?
    };

    if overpayment > Decimal::ZERO {
        debug!(%overpayment, total_ttc = %totals.total_ttc, "invoice is overpaid");
    }

    Ok(PaymentBalance {
        total_ttc: totals.total_ttc,
        amount_paid,
        remaining_balance: remaining,
        overpayment,
        paid_ratio,
    })
}
