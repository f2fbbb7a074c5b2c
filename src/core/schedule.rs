//! Payment schedule (échéancier) consistency checks.
//!
//! Legacy records often carry schedules that do not add up, so nothing here
//! fails: inconsistencies become warnings the renderer shows as a banner.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::ScheduleTolerance;
use super::error::ValidationError;
use super::totals::round_half_up;
use super::types::*;

/// Non-fatal schedule anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// Installment percentages do not add up to 100.
    PercentageMismatch,
    /// Installment amounts do not add up to the TTC total.
    AmountMismatch,
}

impl ScheduleWarning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PercentageMismatch => "percentage_mismatch",
            Self::AmountMismatch => "amount_mismatch",
        }
    }
}

impl std::fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`validate_schedule`].
///
/// `ScheduleReport::default()` is the report of a document without any
/// installment plan: nothing to check, nothing to warn about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Entries by due date ascending; equal dates keep their input order.
    pub sorted_entries: Vec<PaymentScheduleEntry>,
    pub warnings: BTreeSet<ScheduleWarning>,
    pub percentage_sum: Decimal,
    pub amount_sum: Decimal,
    /// Sum of the installments marked paid.
    pub paid_amount: Decimal,
    /// amount_sum - paid_amount.
    pub outstanding_amount: Decimal,
}

impl ScheduleReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_warning(&self, warning: ScheduleWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Check a payment schedule against the document total with the default
/// tolerances (0.5 percentage point, one cent).
pub fn validate_schedule(total_ttc: Decimal, entries: &[PaymentScheduleEntry]) -> ScheduleReport {
    validate_schedule_with(&ScheduleTolerance::default(), total_ttc, entries)
}

/// Check a payment schedule against the document total.
pub fn validate_schedule_with(
    tolerance: &ScheduleTolerance,
    total_ttc: Decimal,
    entries: &[PaymentScheduleEntry],
) -> ScheduleReport {
    // Legacy data is not range-checked, so sums saturate instead of panicking
    let percentage_sum = saturating_sum(entries.iter().map(|e| e.percentage));
    let amount_sum = saturating_sum(entries.iter().map(|e| e.amount));
    let paid_amount = saturating_sum(
        entries
            .iter()
            .filter(|e| e.status == PaymentStatus::Paid)
            .map(|e| e.amount),
    );

    let mut warnings = BTreeSet::new();

    if percentage_sum.saturating_sub(dec!(100)).abs() > tolerance.percentage {
        warn!(
            %percentage_sum,
            installments = entries.len(),
            "payment schedule percentages do not sum to 100"
        );
        warnings.insert(ScheduleWarning::PercentageMismatch);
    }

    if amount_sum.saturating_sub(total_ttc).abs() > tolerance.amount {
        warn!(
            %amount_sum,
            %total_ttc,
            installments = entries.len(),
            "payment schedule amounts do not match document total"
        );
        warnings.insert(ScheduleWarning::AmountMismatch);
    }

    let mut sorted_entries = entries.to_vec();
    // sort_by_key is stable
    sorted_entries.sort_by_key(|e| e.due_date);

    ScheduleReport {
        sorted_entries,
        warnings,
        percentage_sum,
        amount_sum,
        paid_amount,
        outstanding_amount: amount_sum.saturating_sub(paid_amount),
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// One planned installment, before amounts are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub label: String,
    pub due_date: NaiveDate,
    pub percentage: Decimal,
    pub payment_method: PaymentMethod,
}

impl InstallmentPlan {
    pub fn new(label: impl Into<String>, due_date: NaiveDate, percentage: Decimal) -> Self {
        Self {
            label: label.into(),
            due_date,
            percentage,
            payment_method: PaymentMethod::BankTransfer,
        }
    }
}

/// Split a TTC total into pending installments.
///
/// Each installment is rounded half-up to the cent and the last one absorbs
/// the remainder, so the amounts always sum exactly to `total_ttc`. No
/// installment is ever negative: the installments before the last may not
/// cover more than 100 % between them, and a rounded share is capped at what
/// is left of the total.
pub fn split_schedule(
    total_ttc: Decimal,
    plans: &[InstallmentPlan],
) -> Result<Vec<PaymentScheduleEntry>, ValidationError> {
    if total_ttc < Decimal::ZERO {
        return Err(ValidationError::with_rule(
            "total_ttc",
            format!("cannot split a negative total ({total_ttc})"),
            "SCHED-TOTAL",
        ));
    }

    if plans.is_empty() {
        return Err(ValidationError::with_rule(
            "payment_schedule",
            "at least one installment is required",
            "SCHED-EMPTY",
        ));
    }

    for (i, plan) in plans.iter().enumerate() {
        if plan.percentage < Decimal::ZERO || plan.percentage > dec!(100) {
            return Err(ValidationError::with_rule(
                format!("payment_schedule[{i}].percentage"),
                format!(
                    "installment percentage must be between 0 and 100, got {}",
                    plan.percentage
                ),
                "SCHED-PCT",
            ));
        }
    }

    let percentage_sum: Decimal = plans.iter().map(|p| p.percentage).sum();
    if (percentage_sum - dec!(100)).abs() > ScheduleTolerance::default().percentage {
        return Err(ValidationError::with_rule(
            "payment_schedule",
            format!("installment percentages sum to {percentage_sum}, expected 100"),
            "SCHED-SUM",
        ));
    }

    let last = plans.len() - 1;
    let leading_sum: Decimal = plans[..last].iter().map(|p| p.percentage).sum();
    if leading_sum > dec!(100) {
        return Err(ValidationError::with_rule(
            format!("payment_schedule[{last}].percentage"),
            format!(
                "installments before the last already cover {leading_sum} % of the total"
            ),
            "SCHED-SUM",
        ));
    }

    let mut entries = Vec::with_capacity(plans.len());
    let mut allocated = Decimal::ZERO;

    for (i, plan) in plans.iter().enumerate() {
        let amount = if i == last {
            total_ttc - allocated
        } else {
            let share = total_ttc
                .checked_mul(plan.percentage)
                .and_then(|v| v.checked_div(dec!(100)))
                .ok_or_else(|| {
                    ValidationError::with_rule(
                        format!("payment_schedule[{i}].amount"),
                        "amount exceeds the supported decimal range",
                        "AMOUNT-RANGE",
                    )
                })?;
            round_half_up(share, 2).min(total_ttc - allocated)
        };
        allocated += amount;

        entries.push(PaymentScheduleEntry {
            label: plan.label.clone(),
            due_date: plan.due_date,
            percentage: plan.percentage,
            amount,
            payment_method: plan.payment_method.clone(),
            status: PaymentStatus::Pending,
        });
    }

    Ok(entries)
}
