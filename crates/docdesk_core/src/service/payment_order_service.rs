//! Payment order use-case service.

use super::{
    export_lines_with, import_lines_with, read_file, write_file, ServiceError, ServiceResult,
};
use crate::codec::line::{format_payment_order_line, parse_payment_order_line};
use crate::codec::record_file::{format_payment_order_record, parse_payment_order_record};
use crate::model::{DocumentId, DocumentKind, PaymentOrder};
use crate::repo::DocumentRepository;
use log::info;
use std::path::Path;

/// Payment order CRUD plus file import/export.
pub struct PaymentOrderService<R: DocumentRepository<PaymentOrder>> {
    repo: R,
}

impl<R: DocumentRepository<PaymentOrder>> PaymentOrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, order: &PaymentOrder) -> ServiceResult<PaymentOrder> {
        let id = self.repo.insert(order)?;
        info!("event=payment_order_create module=service status=ok id={id}");
        Ok(order.clone().with_id(id))
    }

    pub fn list(&self) -> ServiceResult<Vec<PaymentOrder>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: DocumentId) -> ServiceResult<PaymentOrder> {
        self.repo.get(id)?.ok_or(ServiceError::NotFound {
            kind: DocumentKind::PaymentOrder,
            id,
        })
    }

    /// Copies every field of `details` except the id onto the stored order.
    pub fn update(&self, id: DocumentId, details: &PaymentOrder) -> ServiceResult<PaymentOrder> {
        let mut order = self.get(id)?;
        order.number = details.number.clone();
        order.date = details.date;
        order.user = details.user.clone();
        order.contractor = details.contractor.clone();
        order.amount = details.amount;
        order.currency = details.currency.clone();
        order.currency_rate = details.currency_rate;
        order.commission = details.commission;

        self.repo.update(&order)?;
        info!("event=payment_order_update module=service status=ok id={id}");
        Ok(order)
    }

    pub fn delete(&self, id: DocumentId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=payment_order_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn save(&self, order: &PaymentOrder) -> ServiceResult<PaymentOrder> {
        Ok(self.repo.save(order)?)
    }

    pub fn save_to_file(&self, order: &PaymentOrder, path: impl AsRef<Path>) -> ServiceResult<()> {
        write_file(path.as_ref(), &format_payment_order_record(order)?)
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>) -> ServiceResult<PaymentOrder> {
        let text = read_file(path.as_ref())?;
        Ok(parse_payment_order_record(&text)?)
    }

    pub fn import_lines(&self, path: impl AsRef<Path>) -> ServiceResult<Vec<DocumentId>> {
        import_lines_with(&self.repo, path.as_ref(), parse_payment_order_line)
    }

    pub fn export_lines(&self, path: impl AsRef<Path>) -> ServiceResult<usize> {
        export_lines_with(&self.repo, path.as_ref(), format_payment_order_line)
    }
}
