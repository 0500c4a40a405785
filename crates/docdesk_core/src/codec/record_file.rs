//! English-labelled record file, one field per line.
//!
//! ```text
//! Number: 42
//! Date: 2023-01-01
//! User: alice
//! Amount: 100
//! Employee: bob
//! ```
//!
//! Loading is positional: line *n* carries the *n*-th field after `": "`.
//! Labels are written for readers and are not checked on load.

use super::{
    format_date, parse_date, parse_decimal, reject_line_break, CodecError, CodecResult,
};
use crate::model::{Invoice, Payment, PaymentOrder};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const INVOICE_LABELS: &[&str] = &[
    "Number",
    "Date",
    "User",
    "Amount",
    "Currency",
    "Currency Rate",
    "Product",
    "Quantity",
];
pub const PAYMENT_LABELS: &[&str] = &["Number", "Date", "User", "Amount", "Employee"];
pub const PAYMENT_ORDER_LABELS: &[&str] = &[
    "Number",
    "Date",
    "User",
    "Contractor",
    "Amount",
    "Currency",
    "Currency Rate",
    "Commission",
];

const SEPARATOR: &str = ": ";

pub fn format_invoice_record(invoice: &Invoice) -> CodecResult<String> {
    render(
        INVOICE_LABELS,
        [
            invoice.number.clone(),
            format_date(invoice.date),
            invoice.user.clone(),
            invoice.amount.to_string(),
            invoice.currency.clone(),
            invoice.currency_rate.to_string(),
            invoice.product.clone(),
            invoice.quantity.to_string(),
        ],
    )
}

pub fn format_payment_record(payment: &Payment) -> CodecResult<String> {
    render(
        PAYMENT_LABELS,
        [
            payment.number.clone(),
            format_date(payment.date),
            payment.user.clone(),
            payment.amount.to_string(),
            payment.employee.clone(),
        ],
    )
}

pub fn format_payment_order_record(order: &PaymentOrder) -> CodecResult<String> {
    render(
        PAYMENT_ORDER_LABELS,
        [
            order.number.clone(),
            format_date(order.date),
            order.user.clone(),
            order.contractor.clone(),
            order.amount.to_string(),
            order.currency.clone(),
            order.currency_rate.to_string(),
            order.commission.to_string(),
        ],
    )
}

pub fn parse_invoice_record(text: &str) -> CodecResult<Invoice> {
    let record = Record::parse(text, INVOICE_LABELS)?;
    Ok(Invoice {
        id: None,
        number: record.text(0),
        date: record.date(1)?,
        user: record.text(2),
        amount: record.decimal(3)?,
        currency: record.text(4),
        currency_rate: record.decimal(5)?,
        product: record.text(6),
        quantity: record.decimal(7)?,
    })
}

pub fn parse_payment_record(text: &str) -> CodecResult<Payment> {
    let record = Record::parse(text, PAYMENT_LABELS)?;
    Ok(Payment {
        id: None,
        number: record.text(0),
        date: record.date(1)?,
        user: record.text(2),
        amount: record.decimal(3)?,
        employee: record.text(4),
    })
}

pub fn parse_payment_order_record(text: &str) -> CodecResult<PaymentOrder> {
    let record = Record::parse(text, PAYMENT_ORDER_LABELS)?;
    Ok(PaymentOrder {
        id: None,
        number: record.text(0),
        date: record.date(1)?,
        user: record.text(2),
        contractor: record.text(3),
        amount: record.decimal(4)?,
        currency: record.text(5),
        currency_rate: record.decimal(6)?,
        commission: record.decimal(7)?,
    })
}

fn render<const N: usize>(
    labels: &'static [&'static str],
    values: [String; N],
) -> CodecResult<String> {
    let mut text = String::new();
    for (label, value) in labels.iter().zip(values) {
        reject_line_break(*label, &value)?;
        text.push_str(&format!("{label}{SEPARATOR}{value}\n"));
    }
    Ok(text)
}

struct Record {
    labels: &'static [&'static str],
    values: Vec<String>,
}

impl Record {
    fn parse(text: &str, labels: &'static [&'static str]) -> CodecResult<Self> {
        let mut lines = text.lines();
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            let value = lines
                .next()
                .and_then(|line| line.trim_end_matches('\r').split_once(SEPARATOR))
                .map(|(_, value)| value.to_string())
                .ok_or(CodecError::MissingField { field: *label })?;
            values.push(value);
        }
        Ok(Self { labels, values })
    }

    fn text(&self, index: usize) -> String {
        self.values[index].clone()
    }

    fn date(&self, index: usize) -> CodecResult<NaiveDate> {
        parse_date(self.labels[index], &self.values[index], "record file")
    }

    fn decimal(&self, index: usize) -> CodecResult<Decimal> {
        parse_decimal(self.labels[index], &self.values[index], "record file")
    }
}
