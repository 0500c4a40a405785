//! Applying command-line fields onto documents.

use crate::cli::FieldArgs;
use anyhow::{bail, Result};
use docdesk_core::{Document, DocumentKind, Invoice, Payment, PaymentOrder};

impl FieldArgs {
    /// Names of the flags that were given.
    fn given(&self) -> Vec<&'static str> {
        [
            ("number", self.number.is_some()),
            ("date", self.date.is_some()),
            ("user", self.user.is_some()),
            ("amount", self.amount.is_some()),
            ("currency", self.currency.is_some()),
            ("currency-rate", self.currency_rate.is_some()),
            ("product", self.product.is_some()),
            ("quantity", self.quantity.is_some()),
            ("employee", self.employee.is_some()),
            ("contractor", self.contractor.is_some()),
            ("commission", self.commission.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    fn reject_foreign(&self, kind: DocumentKind, allowed: &[&str]) -> Result<()> {
        if let Some(flag) = self.given().into_iter().find(|flag| !allowed.contains(flag)) {
            bail!("--{flag} does not apply to {kind}");
        }
        Ok(())
    }

    /// Overwrites the fields of `document` that were given on the command line.
    pub fn apply(&self, document: &mut Document) -> Result<()> {
        match document {
            Document::Invoice(doc) => self.apply_invoice(doc),
            Document::Payment(doc) => self.apply_payment(doc),
            Document::PaymentOrder(doc) => self.apply_payment_order(doc),
        }
    }

    fn apply_common(
        &self,
        number: &mut String,
        date: &mut chrono::NaiveDate,
        user: &mut String,
        amount: &mut rust_decimal::Decimal,
    ) {
        set(number, &self.number);
        set(date, &self.date);
        set(user, &self.user);
        set(amount, &self.amount);
    }

    fn apply_invoice(&self, doc: &mut Invoice) -> Result<()> {
        self.reject_foreign(
            DocumentKind::Invoice,
            &[
                "number",
                "date",
                "user",
                "amount",
                "currency",
                "currency-rate",
                "product",
                "quantity",
            ],
        )?;
        self.apply_common(&mut doc.number, &mut doc.date, &mut doc.user, &mut doc.amount);
        set(&mut doc.currency, &self.currency);
        set(&mut doc.currency_rate, &self.currency_rate);
        set(&mut doc.product, &self.product);
        set(&mut doc.quantity, &self.quantity);
        Ok(())
    }

    fn apply_payment(&self, doc: &mut Payment) -> Result<()> {
        self.reject_foreign(
            DocumentKind::Payment,
            &["number", "date", "user", "amount", "employee"],
        )?;
        self.apply_common(&mut doc.number, &mut doc.date, &mut doc.user, &mut doc.amount);
        set(&mut doc.employee, &self.employee);
        Ok(())
    }

    fn apply_payment_order(&self, doc: &mut PaymentOrder) -> Result<()> {
        self.reject_foreign(
            DocumentKind::PaymentOrder,
            &[
                "number",
                "date",
                "user",
                "contractor",
                "amount",
                "currency",
                "currency-rate",
                "commission",
            ],
        )?;
        self.apply_common(&mut doc.number, &mut doc.date, &mut doc.user, &mut doc.amount);
        set(&mut doc.contractor, &self.contractor);
        set(&mut doc.currency, &self.currency);
        set(&mut doc.currency_rate, &self.currency_rate);
        set(&mut doc.commission, &self.commission);
        Ok(())
    }
}

/// A fresh unsaved document of `kind` dated `today`.
pub fn blank(kind: DocumentKind, today: chrono::NaiveDate) -> Document {
    match kind {
        DocumentKind::Invoice => Invoice {
            date: today,
            ..Invoice::default()
        }
        .into(),
        DocumentKind::Payment => Payment {
            date: today,
            ..Payment::default()
        }
        .into(),
        DocumentKind::PaymentOrder => PaymentOrder {
            date: today,
            ..PaymentOrder::default()
        }
        .into(),
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
