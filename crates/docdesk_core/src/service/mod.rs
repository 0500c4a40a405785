//! Document use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into per-kind use-case APIs.
//! - Own file import/export so callers never touch codecs and I/O separately.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Every file failure names the path it happened on.

pub mod invoice_service;
pub mod payment_order_service;
pub mod payment_service;
pub mod store;

use crate::codec::line::parse_lines_with;
use crate::codec::{CodecError, CodecResult};
use crate::model::{DocumentId, DocumentKind};
use crate::repo::{DocumentRepository, Record, RepoError};
use log::{error, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use invoice_service::InvoiceService;
pub use payment_order_service::PaymentOrderService;
pub use payment_service::PaymentService;
pub use store::DocumentStore;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: DocumentKind, id: DocumentId },
    #[error(transparent)]
    Repo(RepoError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("file operation failed for `{}`: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

pub(crate) fn read_file(path: &Path) -> ServiceResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=file_read module=service status=error path={} error={source}",
            path.display()
        );
        ServiceError::File {
            path: path.to_path_buf(),
            source,
        }
    })
}

pub(crate) fn write_file(path: &Path, contents: &str) -> ServiceResult<()> {
    std::fs::write(path, contents).map_err(|source| {
        error!(
            "event=file_write module=service status=error path={} error={source}",
            path.display()
        );
        ServiceError::File {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parses a delimited-line file and inserts every record atomically.
pub(crate) fn import_lines_with<D, R>(
    repo: &R,
    path: &Path,
    parse: impl Fn(&str) -> CodecResult<D>,
) -> ServiceResult<Vec<DocumentId>>
where
    D: Record,
    R: DocumentRepository<D>,
{
    let text = read_file(path)?;
    let documents = parse_lines_with(&text, parse)?;
    let ids = repo.insert_all(&documents)?;
    info!(
        "event=import_lines module=service status=ok kind={} count={} path={}",
        D::KIND,
        ids.len(),
        path.display()
    );
    Ok(ids)
}

/// Writes every stored record as one delimited line, newline-terminated.
pub(crate) fn export_lines_with<D, R>(
    repo: &R,
    path: &Path,
    format: impl Fn(&D) -> CodecResult<String>,
) -> ServiceResult<usize>
where
    D: Record,
    R: DocumentRepository<D>,
{
    let documents = repo.list()?;
    let mut contents = String::new();
    for document in &documents {
        contents.push_str(&format(document)?);
        contents.push('\n');
    }
    write_file(path, &contents)?;
    info!(
        "event=export_lines module=service status=ok kind={} count={} path={}",
        D::KIND,
        documents.len(),
        path.display()
    );
    Ok(documents.len())
}
