//! One connection, three services.

use super::{InvoiceService, PaymentOrderService, PaymentService, ServiceError, ServiceResult};
use crate::model::{Document, DocumentId, DocumentKind, Invoice, Payment, PaymentOrder};
use crate::repo::SqliteDocumentRepository;
use rusqlite::Connection;

pub type SqliteInvoiceService<'conn> = InvoiceService<SqliteDocumentRepository<'conn, Invoice>>;
pub type SqlitePaymentService<'conn> = PaymentService<SqliteDocumentRepository<'conn, Payment>>;
pub type SqlitePaymentOrderService<'conn> =
    PaymentOrderService<SqliteDocumentRepository<'conn, PaymentOrder>>;

/// Bundles the per-kind services over a single SQLite connection and
/// dispatches kind-agnostic `Document` operations to the right one.
pub struct DocumentStore<'conn> {
    pub invoices: SqliteInvoiceService<'conn>,
    pub payments: SqlitePaymentService<'conn>,
    pub payment_orders: SqlitePaymentOrderService<'conn>,
}

impl<'conn> DocumentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            invoices: InvoiceService::new(SqliteDocumentRepository::new(conn)),
            payments: PaymentService::new(SqliteDocumentRepository::new(conn)),
            payment_orders: PaymentOrderService::new(SqliteDocumentRepository::new(conn)),
        }
    }

    /// Every stored document: invoices, then payment orders, then payments.
    pub fn list_all(&self) -> ServiceResult<Vec<Document>> {
        let mut documents = self.list(DocumentKind::Invoice)?;
        documents.extend(self.list(DocumentKind::PaymentOrder)?);
        documents.extend(self.list(DocumentKind::Payment)?);
        Ok(documents)
    }

    /// Stored documents of one kind, ordered by id.
    pub fn list(&self, kind: DocumentKind) -> ServiceResult<Vec<Document>> {
        let documents = match kind {
            DocumentKind::Invoice => self.invoices.list()?.into_iter().map(Document::from).collect(),
            DocumentKind::Payment => self.payments.list()?.into_iter().map(Document::from).collect(),
            DocumentKind::PaymentOrder => self
                .payment_orders
                .list()?
                .into_iter()
                .map(Document::from)
                .collect(),
        };
        Ok(documents)
    }

    pub fn get(&self, kind: DocumentKind, id: DocumentId) -> ServiceResult<Option<Document>> {
        let found = match kind {
            DocumentKind::Invoice => self.invoices.get(id)?.map(Document::from),
            DocumentKind::Payment => optional(self.payments.get(id))?.map(Document::from),
            DocumentKind::PaymentOrder => {
                optional(self.payment_orders.get(id))?.map(Document::from)
            }
        };
        Ok(found)
    }

    /// Upserts through the matching service and returns the stored document.
    pub fn save(&self, document: &Document) -> ServiceResult<Document> {
        let stored = match document {
            Document::Invoice(doc) => self.invoices.create_or_update(doc)?.into(),
            Document::Payment(doc) => self.payments.save(doc)?.into(),
            Document::PaymentOrder(doc) => self.payment_orders.save(doc)?.into(),
        };
        Ok(stored)
    }

    pub fn delete(&self, kind: DocumentKind, id: DocumentId) -> ServiceResult<()> {
        match kind {
            DocumentKind::Invoice => self.invoices.delete(id),
            DocumentKind::Payment => self.payments.delete(id),
            DocumentKind::PaymentOrder => self.payment_orders.delete(id),
        }
    }
}

fn optional<T>(result: ServiceResult<T>) -> ServiceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ServiceError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
