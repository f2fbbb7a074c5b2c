//! Urgency banners ("expire dans 2 jours", "échéance dépassée").
//!
//! Nothing is persisted: the state is derived from a date and the render
//! timestamp on every render. Day counts are calendar-day differences, so a
//! quote valid until tomorrow is one day away at 00:01 and at 23:59 alike.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::UrgencyConfig;

/// Calendar days from `now` to `target`; negative once `target` is past.
pub fn days_until(target: NaiveDate, now: NaiveDate) -> i64 {
    target.signed_duration_since(now).num_days()
}

/// Day-count band shared by every date-driven banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBand {
    /// The date is past.
    Expired,
    /// The date is today.
    Today,
    /// Within the urgent window (1 to 3 days by default).
    Urgent,
    Normal,
}

impl DayBand {
    pub fn from_days(days: i64, config: &UrgencyConfig) -> Self {
        match days {
            d if d < 0 => Self::Expired,
            0 => Self::Today,
            d if d <= config.urgent_within_days => Self::Urgent,
            _ => Self::Normal,
        }
    }
}

/// Banner state of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteState {
    Valid,
    ExpiringSoon,
    Expired,
}

impl QuoteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }
}

/// Quote banner state plus the day count it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUrgency {
    pub state: QuoteState,
    pub days: i64,
}

/// Derive the quote banner with the default 3-day window.
pub fn derive_quote_urgency(valid_until: NaiveDate, now: NaiveDate) -> QuoteUrgency {
    derive_quote_urgency_with(&UrgencyConfig::default(), valid_until, now)
}

pub fn derive_quote_urgency_with(
    config: &UrgencyConfig,
    valid_until: NaiveDate,
    now: NaiveDate,
) -> QuoteUrgency {
    let days = days_until(valid_until, now);
    let state = match DayBand::from_days(days, config) {
        DayBand::Expired => QuoteState::Expired,
        DayBand::Today | DayBand::Urgent => QuoteState::ExpiringSoon,
        DayBand::Normal => QuoteState::Valid,
    };
    debug!(%valid_until, %now, days, state = state.as_str(), "derived quote urgency");
    QuoteUrgency { state, days }
}

/// Same as [`derive_quote_urgency`], taking the render timestamp in its own
/// time zone. Only the local calendar date matters.
pub fn derive_quote_urgency_at<Tz: TimeZone>(
    valid_until: NaiveDate,
    now: &DateTime<Tz>,
) -> QuoteUrgency {
    derive_quote_urgency(valid_until, now.date_naive())
}

/// Invoice due-date banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueUrgency {
    pub band: DayBand,
    pub days: i64,
}

pub fn derive_due_urgency(due_date: NaiveDate, now: NaiveDate) -> DueUrgency {
    derive_due_urgency_with(&UrgencyConfig::default(), due_date, now)
}

pub fn derive_due_urgency_with(
    config: &UrgencyConfig,
    due_date: NaiveDate,
    now: NaiveDate,
) -> DueUrgency {
    let days = days_until(due_date, now);
    DueUrgency {
        band: DayBand::from_days(days, config),
        days,
    }
}
