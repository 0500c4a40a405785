//! Invoice use-case service.

use super::{export_lines_with, import_lines_with, read_file, write_file, ServiceResult};
use crate::codec::line::{format_invoice_line, parse_invoice_line};
use crate::codec::record_file::{format_invoice_record, parse_invoice_record};
use crate::model::{DocumentId, Invoice};
use crate::repo::DocumentRepository;
use log::info;
use std::path::Path;

/// Invoice CRUD plus file import/export.
pub struct InvoiceService<R: DocumentRepository<Invoice>> {
    repo: R,
}

impl<R: DocumentRepository<Invoice>> InvoiceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new invoice, or replaces the stored one when `id` matches a row.
    pub fn create_or_update(&self, invoice: &Invoice) -> ServiceResult<Invoice> {
        let stored = self.repo.save(invoice)?;
        info!(
            "event=invoice_save module=service status=ok id={}",
            stored.id.unwrap_or_default()
        );
        Ok(stored)
    }

    pub fn get(&self, id: DocumentId) -> ServiceResult<Option<Invoice>> {
        Ok(self.repo.get(id)?)
    }

    pub fn list(&self) -> ServiceResult<Vec<Invoice>> {
        Ok(self.repo.list()?)
    }

    pub fn delete(&self, id: DocumentId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=invoice_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Reads an unsaved invoice from a record file. Nothing is persisted.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> ServiceResult<Invoice> {
        let text = read_file(path.as_ref())?;
        Ok(parse_invoice_record(&text)?)
    }

    pub fn save_to_file(&self, invoice: &Invoice, path: impl AsRef<Path>) -> ServiceResult<()> {
        write_file(path.as_ref(), &format_invoice_record(invoice)?)
    }

    /// Imports a delimited-line file; all lines are stored or none are.
    pub fn import_lines(&self, path: impl AsRef<Path>) -> ServiceResult<Vec<DocumentId>> {
        import_lines_with(&self.repo, path.as_ref(), parse_invoice_line)
    }

    /// Exports every stored invoice as delimited lines. Returns the count written.
    pub fn export_lines(&self, path: impl AsRef<Path>) -> ServiceResult<usize> {
        export_lines_with(&self.repo, path.as_ref(), format_invoice_line)
    }
}
