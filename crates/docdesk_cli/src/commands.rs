//! Subcommand execution against an open store.

use crate::cli::{Action, Command};
use crate::fields::blank;
use anyhow::{anyhow, Context, Result};
use docdesk_core::{Document, DocumentId, DocumentKind, DocumentList, DocumentStore};
use log::info;
use std::io::Write;
use std::path::Path;

/// Runs one command, writing user-facing output to `out`.
pub fn run(store: &DocumentStore<'_>, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Invoice { action } => run_action(store, DocumentKind::Invoice, action, out),
        Command::Payment { action } => run_action(store, DocumentKind::Payment, action, out),
        Command::PaymentOrder { action } => {
            run_action(store, DocumentKind::PaymentOrder, action, out)
        }
        Command::List { json } => {
            let list = DocumentList::load(store)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(list.items())?)?;
            } else {
                for text in list.display_texts() {
                    writeln!(out, "{text}")?;
                }
            }
            Ok(())
        }
        Command::Export { kind, id, file } => {
            let kind = DocumentKind::from(kind);
            let mut list = DocumentList::new();
            list.add(fetch(store, kind, id)?);
            list.save_selected_to_file(&file)?;
            writeln!(out, "{}", file.display())?;
            Ok(())
        }
        Command::Import { file } => {
            let mut list = DocumentList::new();
            let stored = list.load_from_file(store, &file)?;
            writeln!(out, "{} {}", stored.kind(), stored.id().unwrap_or_default())?;
            Ok(())
        }
        // Handled before the store is opened.
        Command::Ping | Command::Version => Ok(()),
    }
}

fn run_action(
    store: &DocumentStore<'_>,
    kind: DocumentKind,
    action: Action,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        Action::Add { fields } => {
            let mut document = blank(kind, chrono::Local::now().date_naive());
            fields.apply(&mut document)?;
            let stored = store.save(&document)?;
            info!("event=cli_add module=cli status=ok kind={kind}");
            writeln!(out, "{}", stored.id().unwrap_or_default())?;
        }
        Action::List { json } => {
            let documents = store.list(kind)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&documents)?)?;
            } else {
                for document in &documents {
                    writeln!(
                        out,
                        "{}\t{}",
                        document.id().unwrap_or_default(),
                        document.display_text()
                    )?;
                }
            }
        }
        Action::Show { id, json } => {
            let document = fetch(store, kind, id)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
            } else {
                writeln!(out, "{}", document.details_text())?;
            }
        }
        Action::Update { id, fields } => {
            let mut document = fetch(store, kind, id)?;
            fields.apply(&mut document)?;
            match &document {
                Document::Invoice(doc) => {
                    store.invoices.create_or_update(doc)?;
                }
                Document::Payment(doc) => {
                    store.payments.update(id, doc)?;
                }
                Document::PaymentOrder(doc) => {
                    store.payment_orders.update(id, doc)?;
                }
            }
            writeln!(out, "{id}")?;
        }
        Action::Delete { id } => {
            store.delete(kind, id)?;
            writeln!(out, "{id}")?;
        }
        Action::ImportLines { file } => {
            let ids = match kind {
                DocumentKind::Invoice => store.invoices.import_lines(&file)?,
                DocumentKind::Payment => store.payments.import_lines(&file)?,
                DocumentKind::PaymentOrder => store.payment_orders.import_lines(&file)?,
            };
            for id in ids {
                writeln!(out, "{id}")?;
            }
        }
        Action::ExportLines { file } => {
            let written = match kind {
                DocumentKind::Invoice => store.invoices.export_lines(&file)?,
                DocumentKind::Payment => store.payments.export_lines(&file)?,
                DocumentKind::PaymentOrder => store.payment_orders.export_lines(&file)?,
            };
            writeln!(out, "{written}")?;
        }
        Action::SaveFile { id, file } => {
            save_record_file(store, fetch(store, kind, id)?, &file)?;
            writeln!(out, "{}", file.display())?;
        }
        Action::LoadFile { file } => {
            let loaded: Document = match kind {
                DocumentKind::Invoice => store.invoices.load_from_file(&file)?.into(),
                DocumentKind::Payment => store.payments.load_from_file(&file)?.into(),
                DocumentKind::PaymentOrder => store.payment_orders.load_from_file(&file)?.into(),
            };
            let stored = store.save(&loaded)?;
            writeln!(out, "{}", stored.id().unwrap_or_default())?;
        }
    }
    Ok(())
}

fn fetch(store: &DocumentStore<'_>, kind: DocumentKind, id: DocumentId) -> Result<Document> {
    store
        .get(kind, id)?
        .ok_or_else(|| anyhow!("{kind} {id} not found"))
}

fn save_record_file(store: &DocumentStore<'_>, document: Document, file: &Path) -> Result<()> {
    let saved = match &document {
        Document::Invoice(doc) => store.invoices.save_to_file(doc, file),
        Document::Payment(doc) => store.payments.save_to_file(doc, file),
        Document::PaymentOrder(doc) => store.payment_orders.save_to_file(doc, file),
    };
    saved.with_context(|| format!("saving {} to `{}`", document.kind(), file.display()))
}
