use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::{FactureError, join_errors};
use super::types::*;
use super::validation;

/// Builder for invoices and quotes.
///
/// ```
/// use facture::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = DocumentBuilder::invoice("FAC-2024-001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .due_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
///     .client(ClientBuilder::new("Clinique du Parc").build())
///     .add_line(LineItemBuilder::new("Formation gestes et postures", dec!(2), dec!(700))
///         .unit("jour")
///         .build())
///     .build()
///     .unwrap();
/// assert!(invoice.is_invoice());
/// ```
pub struct DocumentBuilder {
    number: String,
    issue_date: NaiveDate,
    kind: DocumentKind,
    currency_code: String,
    client: Option<ClientProfile>,
    lines: Vec<LineItem>,
    payment_schedule: Vec<PaymentScheduleEntry>,
    notes: Vec<String>,
    payment_terms: Option<String>,
}

impl DocumentBuilder {
    /// Start a draft invoice.
    pub fn invoice(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self::with_kind(
            number,
            issue_date,
            DocumentKind::Invoice {
                status: InvoiceStatus::Draft,
                due_date: None,
                amount_paid: Decimal::ZERO,
            },
        )
    }

    /// Start a draft quote valid until `valid_until` (inclusive).
    pub fn quote(
        number: impl Into<String>,
        issue_date: NaiveDate,
        valid_until: NaiveDate,
    ) -> Self {
        Self::with_kind(
            number,
            issue_date,
            DocumentKind::Quote {
                status: QuoteStatus::Draft,
                valid_until,
            },
        )
    }

    fn with_kind(number: impl Into<String>, issue_date: NaiveDate, kind: DocumentKind) -> Self {
        Self {
            number: number.into(),
            issue_date,
            kind,
            currency_code: "EUR".to_string(),
            client: None,
            lines: Vec::new(),
            payment_schedule: Vec::new(),
            notes: Vec::new(),
            payment_terms: None,
        }
    }

    /// Set the payment due date. Ignored for quotes.
    pub fn due_date(mut self, date: NaiveDate) -> Self {
        if let DocumentKind::Invoice { due_date, .. } = &mut self.kind {
            *due_date = Some(date);
        }
        self
    }

    /// Set the amount already paid. Ignored for quotes.
    pub fn amount_paid(mut self, amount: Decimal) -> Self {
        if let DocumentKind::Invoice { amount_paid, .. } = &mut self.kind {
            *amount_paid = amount;
        }
        self
    }

    /// Set the invoice status. Ignored for quotes.
    pub fn invoice_status(mut self, new_status: InvoiceStatus) -> Self {
        if let DocumentKind::Invoice { status, .. } = &mut self.kind {
            *status = new_status;
        }
        self
    }

    /// Set the quote status. Ignored for invoices.
    pub fn quote_status(mut self, new_status: QuoteStatus) -> Self {
        if let DocumentKind::Quote { status, .. } = &mut self.kind {
            *status = new_status;
        }
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn client(mut self, client: ClientProfile) -> Self {
        self.client = Some(client);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_installment(mut self, entry: PaymentScheduleEntry) -> Self {
        self.payment_schedule.push(entry);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    /// Build the document and run [`validation::validate_document`].
    /// Returns all validation errors (not just the first).
    ///
    /// Drafts may be built without lines; any other status needs at least one.
    pub fn build(self) -> Result<Document, FactureError> {
        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(FactureError::Builder(
                "document cannot have more than 10,000 line items".into(),
            ));
        }
        if self.payment_schedule.len() > 120 {
            return Err(FactureError::Builder(
                "payment schedule cannot have more than 120 installments".into(),
            ));
        }

        let document = self.build_unchecked()?;

        let errors = validation::validate_document(&document);
        if !errors.is_empty() {
            return Err(join_errors(&errors));
        }

        Ok(document)
    }

    /// Build without validation, for legacy records imported as-is.
    pub fn build_unchecked(self) -> Result<Document, FactureError> {
        let client = self
            .client
            .ok_or_else(|| FactureError::Builder("client is required".into()))?;

        Ok(Document {
            number: self.number,
            issue_date: self.issue_date,
            kind: self.kind,
            currency_code: self.currency_code,
            client,
            lines: self.lines,
            payment_schedule: self.payment_schedule,
            notes: self.notes,
            payment_terms: self.payment_terms,
        })
    }
}

/// Builder for [`ClientProfile`].
pub struct ClientBuilder {
    name: String,
    contact_name: Option<String>,
    email: Option<String>,
    address: Option<Address>,
    siret: Option<String>,
}

impl ClientBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_name: None,
            email: None,
            address: None,
            siret: None,
        }
    }

    pub fn contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn siret(mut self, siret: impl Into<String>) -> Self {
        self.siret = Some(siret.into());
        self
    }

    pub fn build(self) -> ClientProfile {
        ClientProfile {
            name: self.name,
            contact_name: self.contact_name,
            email: self.email,
            address: self.address,
            siret: self.siret,
        }
    }
}

/// Builder for [`OrganizationProfile`].
pub struct OrganizationBuilder {
    name: String,
    address: Address,
    siret: Option<String>,
    vat_number: Option<String>,
    training_declaration: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    bank: Option<BankDetails>,
}

impl OrganizationBuilder {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
            siret: None,
            vat_number: None,
            training_declaration: None,
            email: None,
            phone: None,
            bank: None,
        }
    }

    pub fn siret(mut self, siret: impl Into<String>) -> Self {
        self.siret = Some(siret.into());
        self
    }

    pub fn vat_number(mut self, number: impl Into<String>) -> Self {
        self.vat_number = Some(number.into());
        self
    }

    pub fn training_declaration(mut self, number: impl Into<String>) -> Self {
        self.training_declaration = Some(number.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn bank(mut self, iban: impl Into<String>, bic: Option<String>) -> Self {
        self.bank = Some(BankDetails {
            bank_name: None,
            account_holder: Some(self.name.clone()),
            iban: iban.into(),
            bic,
        });
        self
    }

    pub fn build(self) -> OrganizationProfile {
        OrganizationProfile {
            name: self.name,
            address: self.address,
            siret: self.siret,
            vat_number: self.vat_number,
            training_declaration: self.training_declaration,
            email: self.email,
            phone: self.phone,
            bank: self.bank,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    street: Option<String>,
    additional: Option<String>,
    city: String,
    postal_code: String,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            street: None,
            additional: None,
            city: city.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn additional(mut self, additional: impl Into<String>) -> Self {
        self.additional = Some(additional.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            additional: self.additional,
            postal_code: self.postal_code,
            city: self.city,
            country_code: self.country_code,
        }
    }
}

/// Builder for LineItem. VAT defaults to the French standard rate (20 %).
pub struct LineItemBuilder {
    designation: String,
    description: Option<String>,
    quantity: Decimal,
    unit: Option<String>,
    unit_price_ht: Decimal,
    vat_rate: Decimal,
}

impl LineItemBuilder {
    pub fn new(designation: impl Into<String>, quantity: Decimal, unit_price_ht: Decimal) -> Self {
        Self {
            designation: designation.into(),
            description: None,
            quantity,
            unit: None,
            unit_price_ht,
            vat_rate: Decimal::new(20, 0),
        }
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Training organizations are VAT-exempt under art. 261-4-4° CGI.
    pub fn vat_exempt(self) -> Self {
        self.vat_rate(Decimal::ZERO)
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            designation: self.designation,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            unit_price_ht: self.unit_price_ht,
            vat_rate: self.vat_rate,
        }
    }
}

/// Builder for PaymentScheduleEntry. Defaults to a pending bank transfer.
pub struct ScheduleEntryBuilder {
    label: String,
    due_date: NaiveDate,
    percentage: Decimal,
    amount: Decimal,
    payment_method: PaymentMethod,
    status: PaymentStatus,
}

impl ScheduleEntryBuilder {
    pub fn new(
        label: impl Into<String>,
        due_date: NaiveDate,
        percentage: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            due_date,
            percentage,
            amount,
            payment_method: PaymentMethod::BankTransfer,
            status: PaymentStatus::Pending,
        }
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn paid(self) -> Self {
        self.status(PaymentStatus::Paid)
    }

    pub fn build(self) -> PaymentScheduleEntry {
        PaymentScheduleEntry {
            label: self.label,
            due_date: self.due_date,
            percentage: self.percentage,
            amount: self.amount,
            payment_method: self.payment_method,
            status: self.status,
        }
    }
}
