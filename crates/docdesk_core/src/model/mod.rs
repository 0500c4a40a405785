//! Document domain model.
//!
//! # Responsibility
//! - Define the three flat record types managed by DocDesk.
//! - Provide a closed `Document` sum type for code that handles any kind.
//!
//! # Invariants
//! - A document without `id` has never been persisted.
//! - `number` and `user` are never blank on a valid document.
//! - No text field contains a line break; every file format is line oriented.

pub mod invoice;
pub mod payment;
pub mod payment_order;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use invoice::Invoice;
pub use payment::Payment;
pub use payment_order::PaymentOrder;

/// Store-assigned identifier shared by all document kinds.
pub type DocumentId = i64;

/// Date format used for display and every text format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },
    #[error("{field} must not contain line breaks")]
    LineBreakInField { field: &'static str },
}

/// Discriminant for the three document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Payment,
    PaymentOrder,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Invoice, Self::Payment, Self::PaymentOrder];

    /// Stable machine name (`invoice|payment|payment_order`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Payment => "payment",
            Self::PaymentOrder => "payment_order",
        }
    }

    /// Title line used by the block format and by list captions.
    pub fn title(self) -> &'static str {
        match self {
            Self::Invoice => "Накладная",
            Self::Payment => "Платёжка",
            Self::PaymentOrder => "Заявка на оплату",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        let title = title.trim();
        Self::ALL.into_iter().find(|kind| kind.title() == title)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any one of the managed documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Invoice(Invoice),
    Payment(Payment),
    PaymentOrder(PaymentOrder),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Invoice(_) => DocumentKind::Invoice,
            Self::Payment(_) => DocumentKind::Payment,
            Self::PaymentOrder(_) => DocumentKind::PaymentOrder,
        }
    }

    pub fn id(&self) -> Option<DocumentId> {
        match self {
            Self::Invoice(doc) => doc.id,
            Self::Payment(doc) => doc.id,
            Self::PaymentOrder(doc) => doc.id,
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            Self::Invoice(doc) => doc.display_text(),
            Self::Payment(doc) => doc.display_text(),
            Self::PaymentOrder(doc) => doc.display_text(),
        }
    }

    /// Multi-line field summary shown when a document is viewed.
    pub fn details_text(&self) -> String {
        match self {
            Self::Invoice(doc) => doc.details_text(),
            Self::Payment(doc) => doc.details_text(),
            Self::PaymentOrder(doc) => doc.details_text(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Invoice(doc) => doc.validate(),
            Self::Payment(doc) => doc.validate(),
            Self::PaymentOrder(doc) => doc.validate(),
        }
    }
}

impl From<Invoice> for Document {
    fn from(value: Invoice) -> Self {
        Self::Invoice(value)
    }
}

impl From<Payment> for Document {
    fn from(value: Payment) -> Self {
        Self::Payment(value)
    }
}

impl From<PaymentOrder> for Document {
    fn from(value: PaymentOrder) -> Self {
        Self::PaymentOrder(value)
    }
}

pub(crate) fn caption(kind: DocumentKind, date: NaiveDate, number: &str) -> String {
    format!(
        "{} от {} номер {}",
        kind.title(),
        date.format(DATE_FORMAT),
        number
    )
}

/// Heading line plus one `Label: value` line per field, joined with `\n`.
pub(crate) fn details(heading: &str, fields: &[(&str, String)]) -> String {
    let mut lines = vec![heading.to_string()];
    lines.extend(fields.iter().map(|(label, value)| format!("{label}: {value}")));
    lines.join("\n")
}

pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(())
}

pub(crate) fn require_single_line(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::LineBreakInField { field });
    }
    Ok(())
}
