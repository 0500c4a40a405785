//! Invoice record.

use super::{
    caption, details, require_non_blank, require_single_line, DocumentId, DocumentKind,
    ValidationError, DATE_FORMAT,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Goods invoice: a quantity of one product priced in some currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// `None` until the store assigns one.
    pub id: Option<DocumentId>,
    pub number: String,
    pub date: NaiveDate,
    pub user: String,
    pub amount: Decimal,
    pub currency: String,
    pub currency_rate: Decimal,
    pub product: String,
    pub quantity: Decimal,
}

impl Invoice {
    /// Returns a copy carrying the given store id.
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn display_text(&self) -> String {
        caption(DocumentKind::Invoice, self.date, &self.number)
    }

    pub fn details_text(&self) -> String {
        details(
            "Информация о накладной:",
            &[
                ("Номер", self.number.clone()),
                ("Дата", self.date.format(DATE_FORMAT).to_string()),
                ("Пользователь", self.user.clone()),
                ("Сумма", self.amount.to_string()),
                ("Валюта", self.currency.clone()),
                ("Курс валюты", self.currency_rate.to_string()),
                ("Товар", self.product.clone()),
                ("Количество", self.quantity.to_string()),
            ],
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("number", &self.number)?;
        require_non_blank("user", &self.user)?;
        for (field, value) in [
            ("number", &self.number),
            ("user", &self.user),
            ("currency", &self.currency),
            ("product", &self.product),
        ] {
            require_single_line(field, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Invoice;
    use crate::model::ValidationError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample() -> Invoice {
        Invoice {
            number: "123".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            user: "User".to_string(),
            ..Invoice::default()
        }
    }

    #[test]
    fn display_text_names_date_and_number() {
        assert_eq!(sample().display_text(), "Накладная от 2023-01-01 номер 123");
    }

    #[test]
    fn details_text_lists_every_field_without_id() {
        let invoice = Invoice {
            id: Some(9),
            amount: Decimal::new(100, 0),
            currency: "USD".to_string(),
            currency_rate: Decimal::new(1, 0),
            product: "Product".to_string(),
            quantity: Decimal::new(10, 0),
            ..sample()
        };
        let expected = [
            "Информация о накладной:",
            "Номер: 123",
            "Дата: 2023-01-01",
            "Пользователь: User",
            "Сумма: 100",
            "Валюта: USD",
            "Курс валюты: 1",
            "Товар: Product",
            "Количество: 10",
        ]
        .join("\n");
        assert_eq!(invoice.details_text(), expected);
    }

    #[test]
    fn validate_rejects_multiline_product() {
        let mut invoice = sample();
        invoice.product = "two\nlines".to_string();
        assert_eq!(
            invoice.validate(),
            Err(ValidationError::LineBreakInField { field: "product" })
        );
    }
}
