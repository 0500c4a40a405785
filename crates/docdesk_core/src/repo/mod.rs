//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD contracts shared by every document kind.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Writes validate the document before any SQL mutation.
//! - Reads reject invalid persisted state instead of masking it.

pub mod document_repo;
mod records;

pub use document_repo::{
    DocumentRepository, Record, RepoError, RepoResult, SqliteDocumentRepository,
};
