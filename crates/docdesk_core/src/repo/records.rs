//! Table mappings for the three document kinds.
//!
//! Decimals and dates are stored as TEXT so values keep their exact scale.

use super::document_repo::{Record, RepoError, RepoResult};
use crate::model::{
    DocumentId, DocumentKind, Invoice, Payment, PaymentOrder, ValidationError, DATE_FORMAT,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

impl Record for Invoice {
    const KIND: DocumentKind = DocumentKind::Invoice;
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static [&'static str] = &[
        "number",
        "date",
        "user_name",
        "amount",
        "currency",
        "currency_rate",
        "product",
        "quantity",
    ];

    fn id(&self) -> Option<DocumentId> {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Invoice::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.number),
            date_value(self.date),
            text(&self.user),
            decimal_value(self.amount),
            text(&self.currency),
            decimal_value(self.currency_rate),
            text(&self.product),
            decimal_value(self.quantity),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            number: row.get("number")?,
            date: row_date(row, Self::TABLE, "date")?,
            user: row.get("user_name")?,
            amount: row_decimal(row, Self::TABLE, "amount")?,
            currency: row.get("currency")?,
            currency_rate: row_decimal(row, Self::TABLE, "currency_rate")?,
            product: row.get("product")?,
            quantity: row_decimal(row, Self::TABLE, "quantity")?,
        })
    }
}

impl Record for Payment {
    const KIND: DocumentKind = DocumentKind::Payment;
    const TABLE: &'static str = "payments";
    const COLUMNS: &'static [&'static str] = &["number", "date", "user_name", "amount", "employee"];

    fn id(&self) -> Option<DocumentId> {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Payment::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.number),
            date_value(self.date),
            text(&self.user),
            decimal_value(self.amount),
            text(&self.employee),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            number: row.get("number")?,
            date: row_date(row, Self::TABLE, "date")?,
            user: row.get("user_name")?,
            amount: row_decimal(row, Self::TABLE, "amount")?,
            employee: row.get("employee")?,
        })
    }
}

impl Record for PaymentOrder {
    const KIND: DocumentKind = DocumentKind::PaymentOrder;
    const TABLE: &'static str = "payment_orders";
    const COLUMNS: &'static [&'static str] = &[
        "number",
        "date",
        "user_name",
        "contractor",
        "amount",
        "currency",
        "currency_rate",
        "commission",
    ];

    fn id(&self) -> Option<DocumentId> {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        PaymentOrder::validate(self)
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.number),
            date_value(self.date),
            text(&self.user),
            text(&self.contractor),
            decimal_value(self.amount),
            text(&self.currency),
            decimal_value(self.currency_rate),
            decimal_value(self.commission),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            number: row.get("number")?,
            date: row_date(row, Self::TABLE, "date")?,
            user: row.get("user_name")?,
            contractor: row.get("contractor")?,
            amount: row_decimal(row, Self::TABLE, "amount")?,
            currency: row.get("currency")?,
            currency_rate: row_decimal(row, Self::TABLE, "currency_rate")?,
            commission: row_decimal(row, Self::TABLE, "commission")?,
        })
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn date_value(value: NaiveDate) -> Value {
    Value::Text(value.format(DATE_FORMAT).to_string())
}

fn decimal_value(value: Decimal) -> Value {
    Value::Text(value.to_string())
}

fn row_decimal(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Decimal> {
    let raw: String = row.get(column)?;
    Decimal::from_str(&raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid decimal `{raw}` in {table}.{column}"))
    })
}

fn row_date(row: &Row<'_>, table: &str, column: &str) -> RepoResult<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{raw}` in {table}.{column}")))
}
