//! Commercial document types, totals, payment schedules and banners.
//!
//! The calculation path is pure: [`compute_totals`] and
//! [`validate_schedule`] take borrowed input and return fresh values, so they
//! are safe to call from concurrent render requests without locking.

mod builder;
mod config;
mod error;
pub mod format;
mod numbering;
mod render;
mod schedule;
mod totals;
mod types;
mod urgency;
mod validation;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use format::{CurrencyFormat, format_amount, format_percentage};
pub use numbering::*;
pub use render::*;
pub use schedule::*;
pub use totals::*;
pub use types::*;
pub use urgency::*;
pub use validation::*;
