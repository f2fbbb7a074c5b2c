use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A commercial document: an invoice (facture) or a quote (devis).
///
/// Totals are never stored here. They are recomputed from `lines` every time
/// the document is rendered (see [`crate::core::compute_totals`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document number, e.g. "FAC-2024-001" or "DEV-2024-017".
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Invoice- or quote-specific data.
    pub kind: DocumentKind,
    /// Currency code (ISO 4217, e.g. "EUR").
    pub currency_code: String,
    /// Billed client.
    pub client: ClientProfile,
    /// Line items, in display order.
    pub lines: Vec<LineItem>,
    /// Payment schedule (échéancier), in insertion order.
    #[serde(default)]
    pub payment_schedule: Vec<PaymentScheduleEntry>,
    /// Free-text notes printed under the totals.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Payment terms free text.
    #[serde(default)]
    pub payment_terms: Option<String>,
}

impl Document {
    pub fn is_invoice(&self) -> bool {
        matches!(self.kind, DocumentKind::Invoice { .. })
    }

    pub fn is_quote(&self) -> bool {
        matches!(self.kind, DocumentKind::Quote { .. })
    }

    /// Drafts are still being edited and may be incomplete.
    pub fn is_draft(&self) -> bool {
        match &self.kind {
            DocumentKind::Invoice { status, .. } => *status == InvoiceStatus::Draft,
            DocumentKind::Quote { status, .. } => *status == QuoteStatus::Draft,
        }
    }

    /// Amount already paid; always zero for quotes.
    pub fn amount_paid(&self) -> Decimal {
        match &self.kind {
            DocumentKind::Invoice { amount_paid, .. } => *amount_paid,
            DocumentKind::Quote { .. } => Decimal::ZERO,
        }
    }

    /// Status label in snake_case, as stored by the billing back office.
    pub fn status_str(&self) -> &'static str {
        match &self.kind {
            DocumentKind::Invoice { status, .. } => status.as_str(),
            DocumentKind::Quote { status, .. } => status.as_str(),
        }
    }

    /// Parse a document from its JSON representation.
    #[cfg(feature = "json")]
    pub fn from_json(input: &str) -> Result<Self, super::error::FactureError> {
        serde_json::from_str(input)
            .map_err(|e| super::error::FactureError::Builder(format!("invalid document JSON: {e}")))
    }
}

/// Invoice- or quote-specific part of a [`Document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice {
        status: InvoiceStatus,
        /// Payment due date.
        #[serde(default)]
        due_date: Option<NaiveDate>,
        /// Sum of payments received so far.
        #[serde(default)]
        amount_paid: Decimal,
    },
    Quote {
        status: QuoteStatus,
        /// Last day on which the quote can be accepted.
        valid_until: NaiveDate,
    },
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "partially_paid" => Some(Self::PartiallyPaid),
            "overdue" => Some(Self::Overdue),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the invoice still expects payments.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Paid | Self::Cancelled)
    }
}

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Cancelled,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the client has yet to accept or reject the quote.
    pub fn awaits_decision(&self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

/// A billed line (prestation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Short label printed in the designation column.
    pub designation: String,
    /// Longer description printed under the designation.
    #[serde(default)]
    pub description: Option<String>,
    /// Quantity; must be strictly positive.
    pub quantity: Decimal,
    /// Display unit ("jour", "heure", "stagiaire"...).
    #[serde(default)]
    pub unit: Option<String>,
    /// Unit price before tax.
    pub unit_price_ht: Decimal,
    /// VAT rate in percent, 0 to 100.
    pub vat_rate: Decimal,
}

/// Computed figures for one line, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    pub total_ht: Decimal,
    pub vat: Decimal,
    pub total_ttc: Decimal,
}

/// VAT breakdown per rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    /// VAT rate percentage.
    pub rate: Decimal,
    /// Sum of the rounded HT amounts of lines at this rate.
    pub base_ht: Decimal,
    /// Sum of the rounded VAT amounts of lines at this rate.
    pub vat: Decimal,
}

/// Document totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Per-line figures, same order as the input lines.
    pub lines: Vec<LineTotals>,
    /// Sum of rounded line HT amounts.
    pub total_ht: Decimal,
    /// Sum of rounded line VAT amounts.
    pub total_vat: Decimal,
    /// total_ht + total_vat.
    pub total_ttc: Decimal,
    /// VAT grouped by rate, ascending.
    pub vat_breakdown: Vec<VatBreakdown>,
}

impl DocumentTotals {
    /// Totals of a document without lines.
    pub fn zero() -> Self {
        Self {
            lines: Vec::new(),
            total_ht: Decimal::ZERO,
            total_vat: Decimal::ZERO,
            total_ttc: Decimal::ZERO,
            vat_breakdown: Vec::new(),
        }
    }
}

/// One installment of a payment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// Label, e.g. "Acompte 30 %".
    pub label: String,
    pub due_date: NaiveDate,
    /// Share of the document total, in percent.
    pub percentage: Decimal,
    /// Installment amount (TTC).
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
}

/// Payment method of an installment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Check,
    Card,
    Cash,
    DirectDebit,
    Other(String),
}

impl PaymentMethod {
    /// French label as printed on documents.
    pub fn label(&self) -> &str {
        match self {
            Self::BankTransfer => "Virement bancaire",
            Self::Check => "Chèque",
            Self::Card => "Carte bancaire",
            Self::Cash => "Espèces",
            Self::DirectDebit => "Prélèvement",
            Self::Other(label) => label,
        }
    }
}

/// Installment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub additional: Option<String>,
    pub postal_code: String,
    pub city: String,
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
}

/// The billed client (company or trainee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    /// SIRET number, for company clients.
    #[serde(default)]
    pub siret: Option<String>,
}

/// Issuing organization. Display only: no computation depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    pub address: Address,
    pub siret: Option<String>,
    /// Intra-community VAT number.
    pub vat_number: Option<String>,
    /// Training organization declaration number (numéro de déclaration d'activité).
    pub training_declaration: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bank: Option<BankDetails>,
}

/// Bank details printed in the payment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub account_holder: Option<String>,
    pub iban: String,
    pub bic: Option<String>,
}

/// Colors and font used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Hex color, e.g. "#1F3A93".
    pub primary_color: String,
    pub accent_color: String,
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: "#1F3A93".to_string(),
            accent_color: "#F39C12".to_string(),
            font_family: "Helvetica".to_string(),
        }
    }
}
