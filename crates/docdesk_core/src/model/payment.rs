//! Payment record.

use super::{
    caption, details, require_non_blank, require_single_line, DocumentId, DocumentKind,
    ValidationError, DATE_FORMAT,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment made to an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Option<DocumentId>,
    pub number: String,
    pub date: NaiveDate,
    pub user: String,
    pub amount: Decimal,
    pub employee: String,
}

impl Payment {
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn display_text(&self) -> String {
        caption(DocumentKind::Payment, self.date, &self.number)
    }

    pub fn details_text(&self) -> String {
        details(
            "Информация о платёжке:",
            &[
                ("Номер", self.number.clone()),
                ("Дата", self.date.format(DATE_FORMAT).to_string()),
                ("Пользователь", self.user.clone()),
                ("Сумма", self.amount.to_string()),
                ("Сотрудник", self.employee.clone()),
            ],
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("number", &self.number)?;
        require_non_blank("user", &self.user)?;
        require_single_line("number", &self.number)?;
        require_single_line("user", &self.user)?;
        require_single_line("employee", &self.employee)
    }
}
