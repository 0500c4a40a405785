//! Core record-keeping logic for DocDesk.
//!
//! Invoices, payments and payment orders: models, text formats, SQLite
//! persistence, use-case services and the in-memory document list.

pub mod codec;
pub mod config;
pub mod db;
pub mod document_list;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::{CodecError, CodecResult};
pub use config::{Config, ConfigError, ConfigOverrides};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use document_list::{DocumentList, DocumentListener, ListError, ListResult};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError,
};
pub use model::{
    Document, DocumentId, DocumentKind, Invoice, Payment, PaymentOrder, ValidationError,
};
pub use repo::{DocumentRepository, Record, RepoError, RepoResult, SqliteDocumentRepository};
pub use service::{
    DocumentStore, InvoiceService, PaymentOrderService, PaymentService, ServiceError,
    ServiceResult,
};

/// Minimal health-check API for CLI smoke runs.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
