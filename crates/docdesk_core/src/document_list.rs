//! In-memory document list with a current selection.
//!
//! # Responsibility
//! - Hold the documents currently loaded for display, in load order.
//! - Track the selected document and notify listeners of new documents.
//! - Move documents between the list, the store and block files.
//!
//! # Invariants
//! - `selected`, when set, is a valid index into `items`.
//! - Adding a document always selects it.

use crate::codec::block::{format_block, parse_block};
use crate::codec::CodecError;
use crate::model::{Document, DocumentId, DocumentKind};
use crate::service::{read_file, write_file, DocumentStore, ServiceError};
use log::info;
use std::path::Path;
use thiserror::Error;

pub type ListResult<T> = Result<T, ListError>;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("no document selected")]
    NoSelection,
    #[error("index {index} out of range for list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<CodecError> for ListError {
    fn from(value: CodecError) -> Self {
        Self::Service(ServiceError::Codec(value))
    }
}

/// Receives documents as they are created or imported.
pub trait DocumentListener {
    fn on_document_created(&mut self, document: &Document);
}

/// The loaded documents plus the current selection.
#[derive(Default)]
pub struct DocumentList {
    items: Vec<Document>,
    selected: Option<usize>,
    listeners: Vec<Box<dyn DocumentListener>>,
}

impl DocumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads invoices, then payment orders, then payments. Nothing is selected.
    pub fn load(store: &DocumentStore<'_>) -> ListResult<Self> {
        let items = store.list_all()?;
        info!(
            "event=document_list_load module=document_list status=ok count={}",
            items.len()
        );
        Ok(Self {
            items,
            ..Self::default()
        })
    }

    /// Reloads from the store, keeping the selection when its document still exists.
    pub fn refresh(&mut self, store: &DocumentStore<'_>) -> ListResult<()> {
        let selected_key = self.selected().map(document_key);
        self.items = store.list_all()?;
        self.selected = selected_key.and_then(|key| {
            self.items
                .iter()
                .position(|document| document_key(document) == key)
        });
        Ok(())
    }

    /// Registers a listener notified on every `add`.
    pub fn subscribe(&mut self, listener: Box<dyn DocumentListener>) {
        self.listeners.push(listener);
    }

    /// Appends `document`, selects it and notifies listeners.
    pub fn add(&mut self, document: Document) {
        for listener in &mut self.listeners {
            listener.on_document_created(&document);
        }
        self.items.push(document);
        self.selected = Some(self.items.len() - 1);
    }

    pub fn items(&self) -> &[Document] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display captions in list order.
    pub fn display_texts(&self) -> Vec<String> {
        self.items.iter().map(Document::display_text).collect()
    }

    pub fn select(&mut self, index: usize) -> ListResult<&Document> {
        let len = self.items.len();
        let document = self
            .items
            .get(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        self.selected = Some(index);
        Ok(document)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Document> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Removes the item at `index`; selection is cleared when it pointed there
    /// and shifted when it pointed past it.
    pub fn remove(&mut self, index: usize) -> ListResult<Document> {
        if index >= self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.selected = match self.selected {
            Some(current) if current == index => None,
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Writes the selected document to `path` in block format.
    pub fn save_selected_to_file(&self, path: impl AsRef<Path>) -> ListResult<()> {
        let document = self.selected().ok_or(ListError::NoSelection)?;
        let path = path.as_ref();
        write_file(path, &format_block(document)?)?;
        info!(
            "event=document_export module=document_list status=ok kind={} path={}",
            document.kind(),
            path.display()
        );
        Ok(())
    }

    /// Parses a block file, stores the document and selects it.
    ///
    /// A document already listed under the same kind and id is replaced in
    /// place; anything else is appended and announced to listeners.
    ///
    /// # Errors
    /// - `CodecError::UnknownDocumentType` (wrapped) when the title is not recognised.
    pub fn load_from_file(
        &mut self,
        store: &DocumentStore<'_>,
        path: impl AsRef<Path>,
    ) -> ListResult<&Document> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let parsed = parse_block(&text)?;
        let stored = store.save(&parsed)?;
        info!(
            "event=document_import module=document_list status=ok kind={} id={} path={}",
            stored.kind(),
            stored.id().unwrap_or_default(),
            path.display()
        );
        let key = document_key(&stored);
        match self.items.iter().position(|item| document_key(item) == key) {
            Some(index) => {
                self.items[index] = stored;
                self.selected = Some(index);
            }
            None => self.add(stored),
        }
        self.selected().ok_or(ListError::NoSelection)
    }

    /// Deletes the selected document from the store and the list.
    pub fn delete_selected(&mut self, store: &DocumentStore<'_>) -> ListResult<Document> {
        let index = self.selected.ok_or(ListError::NoSelection)?;
        if let Some(document) = self.items.get(index) {
            if let Some(id) = document.id() {
                store.delete(document.kind(), id)?;
            }
        }
        self.remove(index)
    }
}

impl DocumentListener for DocumentList {
    fn on_document_created(&mut self, document: &Document) {
        self.add(document.clone());
    }
}

fn document_key(document: &Document) -> (DocumentKind, Option<DocumentId>) {
    (document.kind(), document.id())
}
