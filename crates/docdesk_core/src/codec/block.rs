//! Titled key-value block format.
//!
//! The first line names the document kind (`Накладная`, `Платёжка`,
//! `Заявка на оплату`); each following line is `Label: value`. Lines are joined
//! with `\n` and there is no trailing newline.
//!
//! Parsing splits each line on the first `": "`, trims key and value, skips
//! blank lines and lets a later duplicate label win. A line without the
//! separator becomes a key with an empty value. `ID` may be empty or absent.

use super::{
    format_date, parse_date, parse_decimal, parse_id, reject_line_break, CodecError, CodecResult,
};
use crate::model::{Document, DocumentKind, Invoice, Payment, PaymentOrder};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

pub const LABEL_ID: &str = "ID";
pub const LABEL_NUMBER: &str = "Номер";
pub const LABEL_DATE: &str = "Дата";
pub const LABEL_USER: &str = "Пользователь";
pub const LABEL_AMOUNT: &str = "Сумма";
pub const LABEL_CURRENCY: &str = "Валюта";
pub const LABEL_INVOICE_RATE: &str = "Курс валюты";
pub const LABEL_ORDER_RATE: &str = "Курс Валюты";
pub const LABEL_PRODUCT: &str = "Товар";
pub const LABEL_QUANTITY: &str = "Количество";
pub const LABEL_EMPLOYEE: &str = "Сотрудник";
pub const LABEL_CONTRACTOR: &str = "Контрагент";
pub const LABEL_COMMISSION: &str = "Комиссия";

const SEPARATOR: &str = ": ";

pub fn format_invoice_block(invoice: &Invoice) -> CodecResult<String> {
    render(
        DocumentKind::Invoice,
        &[
            (LABEL_ID, format_id(invoice.id)),
            (LABEL_NUMBER, invoice.number.clone()),
            (LABEL_DATE, format_date(invoice.date)),
            (LABEL_USER, invoice.user.clone()),
            (LABEL_AMOUNT, invoice.amount.to_string()),
            (LABEL_CURRENCY, invoice.currency.clone()),
            (LABEL_INVOICE_RATE, invoice.currency_rate.to_string()),
            (LABEL_PRODUCT, invoice.product.clone()),
            (LABEL_QUANTITY, invoice.quantity.to_string()),
        ],
    )
}

pub fn format_payment_block(payment: &Payment) -> CodecResult<String> {
    render(
        DocumentKind::Payment,
        &[
            (LABEL_ID, format_id(payment.id)),
            (LABEL_NUMBER, payment.number.clone()),
            (LABEL_DATE, format_date(payment.date)),
            (LABEL_USER, payment.user.clone()),
            (LABEL_AMOUNT, payment.amount.to_string()),
            (LABEL_EMPLOYEE, payment.employee.clone()),
        ],
    )
}

pub fn format_payment_order_block(order: &PaymentOrder) -> CodecResult<String> {
    render(
        DocumentKind::PaymentOrder,
        &[
            (LABEL_ID, format_id(order.id)),
            (LABEL_NUMBER, order.number.clone()),
            (LABEL_DATE, format_date(order.date)),
            (LABEL_USER, order.user.clone()),
            (LABEL_CONTRACTOR, order.contractor.clone()),
            (LABEL_AMOUNT, order.amount.to_string()),
            (LABEL_CURRENCY, order.currency.clone()),
            (LABEL_ORDER_RATE, order.currency_rate.to_string()),
            (LABEL_COMMISSION, order.commission.to_string()),
        ],
    )
}

pub fn format_block(document: &Document) -> CodecResult<String> {
    match document {
        Document::Invoice(doc) => format_invoice_block(doc),
        Document::Payment(doc) => format_payment_block(doc),
        Document::PaymentOrder(doc) => format_payment_order_block(doc),
    }
}

/// Parses invoice data lines (the block without its title line).
pub fn parse_invoice_block(data: &str) -> CodecResult<Invoice> {
    let block = Block::parse(data);
    Ok(Invoice {
        id: block.id()?,
        number: block.text(LABEL_NUMBER)?,
        date: block.date(LABEL_DATE)?,
        user: block.text(LABEL_USER)?,
        amount: block.decimal(LABEL_AMOUNT)?,
        currency: block.text(LABEL_CURRENCY)?,
        currency_rate: block.decimal(LABEL_INVOICE_RATE)?,
        product: block.text(LABEL_PRODUCT)?,
        quantity: block.decimal(LABEL_QUANTITY)?,
    })
}

pub fn parse_payment_block(data: &str) -> CodecResult<Payment> {
    let block = Block::parse(data);
    Ok(Payment {
        id: block.id()?,
        number: block.text(LABEL_NUMBER)?,
        date: block.date(LABEL_DATE)?,
        user: block.text(LABEL_USER)?,
        amount: block.decimal(LABEL_AMOUNT)?,
        employee: block.text(LABEL_EMPLOYEE)?,
    })
}

pub fn parse_payment_order_block(data: &str) -> CodecResult<PaymentOrder> {
    let block = Block::parse(data);
    Ok(PaymentOrder {
        id: block.id()?,
        number: block.text(LABEL_NUMBER)?,
        date: block.date(LABEL_DATE)?,
        user: block.text(LABEL_USER)?,
        contractor: block.text(LABEL_CONTRACTOR)?,
        amount: block.decimal(LABEL_AMOUNT)?,
        currency: block.text(LABEL_CURRENCY)?,
        currency_rate: block.decimal(LABEL_ORDER_RATE)?,
        commission: block.decimal(LABEL_COMMISSION)?,
    })
}

/// Reads the title line and dispatches to the matching parser.
pub fn parse_block(text: &str) -> CodecResult<Document> {
    let text = text.trim_start_matches('\u{feff}');
    let (title, data) = text.split_once('\n').unwrap_or((text, ""));
    let title = title.trim();
    match DocumentKind::from_title(title) {
        Some(DocumentKind::Invoice) => parse_invoice_block(data).map(Document::from),
        Some(DocumentKind::Payment) => parse_payment_block(data).map(Document::from),
        Some(DocumentKind::PaymentOrder) => parse_payment_order_block(data).map(Document::from),
        None => Err(CodecError::UnknownDocumentType(title.to_string())),
    }
}

fn format_id(id: Option<i64>) -> String {
    id.map(|value| value.to_string()).unwrap_or_default()
}

fn render(kind: DocumentKind, fields: &[(&'static str, String)]) -> CodecResult<String> {
    let mut lines = Vec::with_capacity(fields.len() + 1);
    lines.push(kind.title().to_string());
    for (label, value) in fields {
        reject_line_break(*label, value)?;
        lines.push(format!("{label}{SEPARATOR}{value}"));
    }
    Ok(lines.join("\n"))
}

struct Block {
    values: HashMap<String, String>,
}

impl Block {
    fn parse(data: &str) -> Self {
        let values = data
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(SEPARATOR) {
                Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
                None => (line.trim().to_string(), String::new()),
            })
            .collect();
        Self { values }
    }

    fn get(&self, label: &'static str) -> CodecResult<&str> {
        self.values
            .get(label)
            .map(String::as_str)
            .ok_or(CodecError::MissingField { field: label })
    }

    fn id(&self) -> CodecResult<Option<i64>> {
        match self.values.get(LABEL_ID) {
            Some(value) => parse_id(value, "block"),
            None => Ok(None),
        }
    }

    fn text(&self, label: &'static str) -> CodecResult<String> {
        self.get(label).map(str::to_string)
    }

    fn date(&self, label: &'static str) -> CodecResult<NaiveDate> {
        parse_date(label, self.get(label)?, "block")
    }

    fn decimal(&self, label: &'static str) -> CodecResult<Decimal> {
        parse_decimal(label, self.get(label)?, "block")
    }
}
