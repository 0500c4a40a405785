//! Comma-delimited single-line format.
//!
//! One document per line, fields in a fixed per-kind order, no header and no id:
//!
//! - invoice: `number,date,user,amount,currency,currency_rate,product,quantity`
//! - payment: `number,date,user,amount,employee`
//! - payment order: `number,date,user,contractor,amount,currency,currency_rate,commission`
//!
//! Parsing needs at least the listed number of fields; extra trailing fields
//! are ignored. Parsed documents are always unsaved (`id = None`).

use super::{format_date, parse_date, parse_decimal, CodecError, CodecResult};
use crate::model::{Document, DocumentKind, Invoice, Payment, PaymentOrder};
use chrono::NaiveDate;
use rust_decimal::Decimal;

const DELIMITER: char = ',';

pub const INVOICE_FIELDS: &[&str] = &[
    "number",
    "date",
    "user",
    "amount",
    "currency",
    "currency_rate",
    "product",
    "quantity",
];
pub const PAYMENT_FIELDS: &[&str] = &["number", "date", "user", "amount", "employee"];
pub const PAYMENT_ORDER_FIELDS: &[&str] = &[
    "number",
    "date",
    "user",
    "contractor",
    "amount",
    "currency",
    "currency_rate",
    "commission",
];

pub fn format_invoice_line(invoice: &Invoice) -> CodecResult<String> {
    join_fields(&[
        ("number", invoice.number.clone()),
        ("date", format_date(invoice.date)),
        ("user", invoice.user.clone()),
        ("amount", invoice.amount.to_string()),
        ("currency", invoice.currency.clone()),
        ("currency_rate", invoice.currency_rate.to_string()),
        ("product", invoice.product.clone()),
        ("quantity", invoice.quantity.to_string()),
    ])
}

pub fn format_payment_line(payment: &Payment) -> CodecResult<String> {
    join_fields(&[
        ("number", payment.number.clone()),
        ("date", format_date(payment.date)),
        ("user", payment.user.clone()),
        ("amount", payment.amount.to_string()),
        ("employee", payment.employee.clone()),
    ])
}

pub fn format_payment_order_line(order: &PaymentOrder) -> CodecResult<String> {
    join_fields(&[
        ("number", order.number.clone()),
        ("date", format_date(order.date)),
        ("user", order.user.clone()),
        ("contractor", order.contractor.clone()),
        ("amount", order.amount.to_string()),
        ("currency", order.currency.clone()),
        ("currency_rate", order.currency_rate.to_string()),
        ("commission", order.commission.to_string()),
    ])
}

pub fn parse_invoice_line(line: &str) -> CodecResult<Invoice> {
    let fields = Fields::split(line, INVOICE_FIELDS.len())?;
    Ok(Invoice {
        id: None,
        number: fields.text(0),
        date: fields.date(1, "date")?,
        user: fields.text(2),
        amount: fields.decimal(3, "amount")?,
        currency: fields.text(4),
        currency_rate: fields.decimal(5, "currency_rate")?,
        product: fields.text(6),
        quantity: fields.decimal(7, "quantity")?,
    })
}

pub fn parse_payment_line(line: &str) -> CodecResult<Payment> {
    let fields = Fields::split(line, PAYMENT_FIELDS.len())?;
    Ok(Payment {
        id: None,
        number: fields.text(0),
        date: fields.date(1, "date")?,
        user: fields.text(2),
        amount: fields.decimal(3, "amount")?,
        employee: fields.text(4),
    })
}

pub fn parse_payment_order_line(line: &str) -> CodecResult<PaymentOrder> {
    let fields = Fields::split(line, PAYMENT_ORDER_FIELDS.len())?;
    Ok(PaymentOrder {
        id: None,
        number: fields.text(0),
        date: fields.date(1, "date")?,
        user: fields.text(2),
        contractor: fields.text(3),
        amount: fields.decimal(4, "amount")?,
        currency: fields.text(5),
        currency_rate: fields.decimal(6, "currency_rate")?,
        commission: fields.decimal(7, "commission")?,
    })
}

pub fn format_line(document: &Document) -> CodecResult<String> {
    match document {
        Document::Invoice(doc) => format_invoice_line(doc),
        Document::Payment(doc) => format_payment_line(doc),
        Document::PaymentOrder(doc) => format_payment_order_line(doc),
    }
}

pub fn parse_line(kind: DocumentKind, line: &str) -> CodecResult<Document> {
    match kind {
        DocumentKind::Invoice => parse_invoice_line(line).map(Document::from),
        DocumentKind::Payment => parse_payment_line(line).map(Document::from),
        DocumentKind::PaymentOrder => parse_payment_order_line(line).map(Document::from),
    }
}

/// Parses every non-blank line of `text`.
///
/// The first failure is wrapped in `CodecError::AtLine` with its 1-based line number.
pub fn parse_lines(kind: DocumentKind, text: &str) -> CodecResult<Vec<Document>> {
    parse_lines_with(text, |line| parse_line(kind, line))
}

/// Applies `parse` to every non-blank line of `text`, stopping at the first
/// failure, which is reported as `CodecError::AtLine`.
pub fn parse_lines_with<D>(
    text: &str,
    parse: impl Fn(&str) -> CodecResult<D>,
) -> CodecResult<Vec<D>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse(line).map_err(|err| CodecError::AtLine {
                line_no: index + 1,
                source: Box::new(err),
            })
        })
        .collect()
}

fn join_fields(fields: &[(&'static str, String)]) -> CodecResult<String> {
    for (name, value) in fields {
        if value.contains([DELIMITER, '\n', '\r']) {
            return Err(CodecError::DelimiterInField { field: *name });
        }
    }
    Ok(fields
        .iter()
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(","))
}

struct Fields<'a> {
    line: &'a str,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(line: &'a str, expected: usize) -> CodecResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let parts: Vec<&str> = line.split(DELIMITER).collect();
        if parts.len() < expected {
            return Err(CodecError::MalformedLine {
                expected,
                found: parts.len(),
                line: line.to_string(),
            });
        }
        Ok(Self { line, parts })
    }

    fn text(&self, index: usize) -> String {
        self.parts[index].to_string()
    }

    fn date(&self, index: usize, field: &'static str) -> CodecResult<NaiveDate> {
        parse_date(field, self.parts[index], &self.context())
    }

    fn decimal(&self, index: usize, field: &'static str) -> CodecResult<Decimal> {
        parse_decimal(field, self.parts[index], &self.context())
    }

    fn context(&self) -> String {
        format!("line `{}`", self.line)
    }
}
