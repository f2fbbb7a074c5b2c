use chrono::{Datelike, NaiveDate};

use super::error::FactureError;
use super::types::DocumentKind;

const INVOICE_PREFIX: &str = "FAC-";
const QUOTE_PREFIX: &str = "DEV-";

/// Yearly document counter producing `{prefix}{year}-{counter}`, e.g.
/// "FAC-2024-007".
///
/// French invoicing rules (art. 242 nonies A, annexe II CGI) require a unique,
/// chronological and continuous numbering: the counter never skips, restarts
/// at 1 each year and refuses to number a document dated in a closed year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumberSequence {
    prefix: String,
    year: i32,
    counter: u64,
    width: usize,
}

impl DocumentNumberSequence {
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            counter: 1,
            width: 3,
        }
    }

    /// "FAC-" sequence.
    pub fn invoices(year: i32) -> Self {
        Self::new(INVOICE_PREFIX, year)
    }

    /// "DEV-" sequence.
    pub fn quotes(year: i32) -> Self {
        Self::new(QUOTE_PREFIX, year)
    }

    /// The sequence a document of this kind is numbered from.
    pub fn for_kind(kind: &DocumentKind, year: i32) -> Self {
        match kind {
            DocumentKind::Invoice { .. } => Self::invoices(year),
            DocumentKind::Quote { .. } => Self::quotes(year),
        }
    }

    /// Continue after the last number issued, e.g. "FAC-2024-041" gives a
    /// sequence whose next number is "FAC-2024-042". The counter width of the
    /// last number is kept.
    pub fn resume_after(last_issued: &str) -> Result<Self, FactureError> {
        let invalid = || {
            FactureError::Numbering(format!(
                "'{last_issued}' is not a {{prefix}}{{year}}-{{counter}} document number"
            ))
        };

        let (head, digits) = last_issued.rsplit_once('-').ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let last: u64 = digits.parse().map_err(|_| invalid())?;

        let year_start = head.len().checked_sub(4).ok_or_else(invalid)?;
        let year: i32 = head
            .get(year_start..)
            .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|y| y.parse().ok())
            .ok_or_else(invalid)?;

        let counter = last.checked_add(1).ok_or_else(|| {
            FactureError::Numbering(format!("counter of '{last_issued}' cannot be incremented"))
        })?;

        Ok(Self {
            prefix: head[..year_start].to_string(),
            year,
            counter,
            width: digits.len(),
        })
    }

    /// Minimum number of counter digits (default 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The number [`Self::next_number`] would hand out.
    pub fn peek(&self) -> String {
        format!(
            "{}{}-{:0>width$}",
            self.prefix,
            self.year,
            self.counter,
            width = self.width
        )
    }

    /// Hand out the next number of the current year.
    pub fn next_number(&mut self) -> String {
        let number = self.peek();
        self.counter += 1;
        number
    }

    /// Number a document issued on `issue_date`.
    ///
    /// The first document of a new year restarts the counter at 1. A date in
    /// a year before the current one is refused, since numbering it would
    /// break chronological order.
    pub fn assign(&mut self, issue_date: NaiveDate) -> Result<String, FactureError> {
        let year = issue_date.year();
        if year < self.year {
            return Err(FactureError::Numbering(format!(
                "{} sequence is in {}, cannot number a document issued on {issue_date}",
                self.prefix, self.year
            )));
        }
        if year > self.year {
            self.year = year;
            self.counter = 1;
        }
        Ok(self.next_number())
    }
}

/// The invoice and quote sequences of one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumbering {
    pub invoices: DocumentNumberSequence,
    pub quotes: DocumentNumberSequence,
}

impl DocumentNumbering {
    /// Both sequences starting at 1 in `year`.
    pub fn new(year: i32) -> Self {
        Self {
            invoices: DocumentNumberSequence::invoices(year),
            quotes: DocumentNumberSequence::quotes(year),
        }
    }

    /// Number a document of `kind` issued on `issue_date` from the matching
    /// sequence.
    pub fn assign(
        &mut self,
        kind: &DocumentKind,
        issue_date: NaiveDate,
    ) -> Result<String, FactureError> {
        match kind {
            DocumentKind::Invoice { .. } => self.invoices.assign(issue_date),
            DocumentKind::Quote { .. } => self.quotes.assign(issue_date),
        }
    }
}
