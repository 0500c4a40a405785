//! Payment use-case service.

use super::{
    export_lines_with, import_lines_with, read_file, write_file, ServiceError, ServiceResult,
};
use crate::codec::line::{format_payment_line, parse_payment_line};
use crate::codec::record_file::{format_payment_record, parse_payment_record};
use crate::model::{DocumentId, DocumentKind, Payment};
use crate::repo::DocumentRepository;
use log::info;
use std::path::Path;

/// Payment CRUD plus file import/export.
pub struct PaymentService<R: DocumentRepository<Payment>> {
    repo: R,
}

impl<R: DocumentRepository<Payment>> PaymentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores `payment` as a new row and returns it with its id.
    pub fn create(&self, payment: &Payment) -> ServiceResult<Payment> {
        let id = self.repo.insert(payment)?;
        info!("event=payment_create module=service status=ok id={id}");
        Ok(payment.clone().with_id(id))
    }

    pub fn list(&self) -> ServiceResult<Vec<Payment>> {
        Ok(self.repo.list()?)
    }

    /// # Errors
    /// - `ServiceError::NotFound` when no payment has this id.
    pub fn get(&self, id: DocumentId) -> ServiceResult<Payment> {
        self.repo.get(id)?.ok_or(ServiceError::NotFound {
            kind: DocumentKind::Payment,
            id,
        })
    }

    /// Copies every field of `details` except the id onto the stored payment.
    pub fn update(&self, id: DocumentId, details: &Payment) -> ServiceResult<Payment> {
        let mut payment = self.get(id)?;
        payment.number = details.number.clone();
        payment.date = details.date;
        payment.user = details.user.clone();
        payment.amount = details.amount;
        payment.employee = details.employee.clone();

        self.repo.update(&payment)?;
        info!("event=payment_update module=service status=ok id={id}");
        Ok(payment)
    }

    pub fn delete(&self, id: DocumentId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=payment_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Upsert used by block import.
    pub fn save(&self, payment: &Payment) -> ServiceResult<Payment> {
        Ok(self.repo.save(payment)?)
    }

    pub fn save_to_file(&self, payment: &Payment, path: impl AsRef<Path>) -> ServiceResult<()> {
        write_file(path.as_ref(), &format_payment_record(payment)?)
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>) -> ServiceResult<Payment> {
        let text = read_file(path.as_ref())?;
        Ok(parse_payment_record(&text)?)
    }

    pub fn import_lines(&self, path: impl AsRef<Path>) -> ServiceResult<Vec<DocumentId>> {
        import_lines_with(&self.repo, path.as_ref(), parse_payment_line)
    }

    pub fn export_lines(&self, path: impl AsRef<Path>) -> ServiceResult<usize> {
        export_lines_with(&self.repo, path.as_ref(), format_payment_line)
    }
}
