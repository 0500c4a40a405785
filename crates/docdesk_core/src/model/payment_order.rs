//! Payment order record.

use super::{
    caption, details, require_non_blank, require_single_line, DocumentId, DocumentKind,
    ValidationError, DATE_FORMAT,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to pay a contractor, with currency conversion and commission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: Option<DocumentId>,
    pub number: String,
    pub date: NaiveDate,
    pub user: String,
    pub contractor: String,
    pub amount: Decimal,
    pub currency: String,
    pub currency_rate: Decimal,
    pub commission: Decimal,
}

impl PaymentOrder {
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn display_text(&self) -> String {
        caption(DocumentKind::PaymentOrder, self.date, &self.number)
    }

    /// Unlike the block format, the rate label here is lowercase `Курс валюты`.
    pub fn details_text(&self) -> String {
        details(
            "Информация о заявке на оплату:",
            &[
                ("Номер", self.number.clone()),
                ("Дата", self.date.format(DATE_FORMAT).to_string()),
                ("Пользователь", self.user.clone()),
                ("Контрагент", self.contractor.clone()),
                ("Сумма", self.amount.to_string()),
                ("Валюта", self.currency.clone()),
                ("Курс валюты", self.currency_rate.to_string()),
                ("Комиссия", self.commission.to_string()),
            ],
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("number", &self.number)?;
        require_non_blank("user", &self.user)?;
        for (field, value) in [
            ("number", &self.number),
            ("user", &self.user),
            ("contractor", &self.contractor),
            ("currency", &self.currency),
        ] {
            require_single_line(field, value)?;
        }
        Ok(())
    }
}
