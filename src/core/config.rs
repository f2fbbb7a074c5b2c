use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::FactureError;
use super::format::CurrencyFormat;

/// Settings passed explicitly to [`super::RenderContext::build`].
///
/// Every field has a default, so a partial JSON document only overrides what
/// it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactureConfig {
    pub schedule: ScheduleTolerance,
    pub urgency: UrgencyConfig,
    pub currency: CurrencyFormat,
}

impl FactureConfig {
    /// Load configuration from JSON.
    #[cfg(feature = "json")]
    pub fn from_json(input: &str) -> Result<Self, FactureError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| FactureError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Reject tolerances and thresholds that cannot be meaningful.
    pub fn check(&self) -> Result<(), FactureError> {
        if self.schedule.percentage < Decimal::ZERO || self.schedule.amount < Decimal::ZERO {
            return Err(FactureError::Config(
                "schedule tolerances must not be negative".into(),
            ));
        }
        if self.urgency.urgent_within_days < 0 {
            return Err(FactureError::Config(
                "urgent_within_days must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// How far a payment schedule may drift from the document total before a
/// warning is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTolerance {
    /// Allowed gap between the percentage sum and 100.
    pub percentage: Decimal,
    /// Allowed gap between the amount sum and the TTC total (one cent).
    pub amount: Decimal,
}

impl Default for ScheduleTolerance {
    fn default() -> Self {
        Self {
            percentage: dec!(0.5),
            amount: dec!(0.01),
        }
    }
}

/// Day-count thresholds of urgency banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyConfig {
    /// A date this many days away or closer (and not past) is urgent.
    pub urgent_within_days: i64,
}

impl Default for UrgencyConfig {
    fn default() -> Self {
        Self {
            urgent_within_days: 3,
        }
    }
}
