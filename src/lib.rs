//! # facture
//!
//! Financial content of commercial documents (factures and devis) for a
//! training-organization back office: HT/TVA/TTC totals, remaining balance,
//! payment-schedule consistency and urgency banners, prepared for an external
//! PDF renderer.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Lines are rounded half-up to the cent before summation.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use facture::core::*;
//! use rust_decimal_macros::dec;
//!
//! let totals = compute_totals(&[
//!     LineItemBuilder::new("Formation SST", dec!(2), dec!(100.00)).vat_rate(dec!(20)).build(),
//! ])
//! .unwrap();
//! assert_eq!(totals.total_ttc, dec!(240.00));
//!
//! let report = validate_schedule(totals.total_ttc, &[
//!     ScheduleEntryBuilder::new("Acompte", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), dec!(50), dec!(120)).build(),
//!     ScheduleEntryBuilder::new("Solde", NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), dec!(50), dec!(120)).build(),
//! ]);
//! assert!(report.warnings.is_empty());
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let urgency = derive_quote_urgency(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(), today);
//! assert_eq!(urgency.state, QuoteState::ExpiringSoon);
//! assert_eq!(urgency.days, 2);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals, schedules, urgency, render context |
//! | `json` | JSON loading of documents/config, JSON render context |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
