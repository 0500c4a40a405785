//! Generic document repository contract and its SQLite implementation.

use crate::db::DbError;
use crate::model::{DocumentId, DocumentKind, ValidationError};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{kind} not found: {id}")]
    NotFound { kind: DocumentKind, id: DocumentId },
    #[error("{0} has no id; it was never stored")]
    MissingId(DocumentKind),
    #[error("invalid persisted document data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table mapping for a storable document.
///
/// `COLUMNS` lists every column except `id`, in the order `to_values` binds them.
pub trait Record: Clone + Sized {
    const KIND: DocumentKind;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<DocumentId>;
    fn set_id(&mut self, id: DocumentId);
    fn validate(&self) -> Result<(), ValidationError>;
    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// CRUD operations over one document kind.
pub trait DocumentRepository<D: Record> {
    /// Inserts `document` as a new row, ignoring any id it carries.
    fn insert(&self, document: &D) -> RepoResult<DocumentId>;
    /// Inserts all documents in one transaction; nothing is stored on failure.
    fn insert_all(&self, documents: &[D]) -> RepoResult<Vec<DocumentId>>;
    /// Replaces every column of the row identified by `document.id`.
    fn update(&self, document: &D) -> RepoResult<()>;
    /// Updates when the id exists, inserts otherwise. Returns the stored document.
    fn save(&self, document: &D) -> RepoResult<D>;
    fn get(&self, id: DocumentId) -> RepoResult<Option<D>>;
    /// All rows ordered by id.
    fn list(&self) -> RepoResult<Vec<D>>;
    /// Deleting a missing id is a no-op.
    fn delete(&self, id: DocumentId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed repository for one document kind.
pub struct SqliteDocumentRepository<'conn, D> {
    conn: &'conn Connection,
    _kind: PhantomData<fn() -> D>,
}

impl<'conn, D: Record> SqliteDocumentRepository<'conn, D> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _kind: PhantomData,
        }
    }

    fn insert_sql() -> String {
        let placeholders = (1..=D::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            D::TABLE,
            D::COLUMNS.join(", ")
        )
    }

    fn update_sql() -> String {
        let assignments = D::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            D::TABLE,
            D::COLUMNS.len() + 1
        )
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", D::COLUMNS.join(", "), D::TABLE)
    }

    fn insert_on(conn: &Connection, document: &D) -> RepoResult<DocumentId> {
        document.validate()?;
        conn.execute(&Self::insert_sql(), params_from_iter(document.to_values()))?;
        Ok(conn.last_insert_rowid())
    }

    fn exists(&self, id: DocumentId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1;", D::TABLE),
                [id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl<D: Record> DocumentRepository<D> for SqliteDocumentRepository<'_, D> {
    fn insert(&self, document: &D) -> RepoResult<DocumentId> {
        let id = Self::insert_on(self.conn, document)?;
        debug!("event=document_insert module=repo kind={} id={id}", D::KIND);
        Ok(id)
    }

    fn insert_all(&self, documents: &[D]) -> RepoResult<Vec<DocumentId>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            ids.push(Self::insert_on(&tx, document)?);
        }
        tx.commit()?;
        info!(
            "event=document_insert_all module=repo kind={} count={}",
            D::KIND,
            ids.len()
        );
        Ok(ids)
    }

    fn update(&self, document: &D) -> RepoResult<()> {
        let id = document.id().ok_or(RepoError::MissingId(D::KIND))?;
        document.validate()?;

        let mut values = document.to_values();
        values.push(Value::Integer(id));
        let changed = self
            .conn
            .execute(&Self::update_sql(), params_from_iter(values))?;

        if changed == 0 {
            return Err(RepoError::NotFound { kind: D::KIND, id });
        }

        debug!("event=document_update module=repo kind={} id={id}", D::KIND);
        Ok(())
    }

    fn save(&self, document: &D) -> RepoResult<D> {
        let mut stored = document.clone();
        match document.id() {
            Some(id) if self.exists(id)? => self.update(document)?,
            _ => {
                let id = self.insert(document)?;
                stored.set_id(id);
            }
        }
        Ok(stored)
    }

    fn get(&self, id: DocumentId) -> RepoResult<Option<D>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(D::from_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<D>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(D::from_row(row)?);
        }

        Ok(documents)
    }

    fn delete(&self, id: DocumentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", D::TABLE), [id])?;
        debug!(
            "event=document_delete module=repo kind={} id={id} changed={changed}",
            D::KIND
        );
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", D::TABLE),
            [],
            |row| row.get::<_, i64>(0),
        )?;
        u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }
}
