use chrono::NaiveDate;
use docdesk_core::db::open_db_in_memory;
use docdesk_core::{
    CodecError, Document, DocumentKind, DocumentList, DocumentListener, DocumentStore, ListError,
    Payment, PaymentOrder, ServiceError,
};
use rust_decimal_macros::dec;
use std::fs;
use std::sync::{Arc, Mutex};

fn payment(number: &str) -> Payment {
    Payment {
        id: None,
        number: number.to_string(),
        date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        user: "User".to_string(),
        amount: dec!(100),
        employee: "Employee".to_string(),
    }
}

struct Recorder(Arc<Mutex<Vec<String>>>);

impl DocumentListener for Recorder {
    fn on_document_created(&mut self, document: &Document) {
        self.0.lock().unwrap().push(document.display_text());
    }
}

#[test]
fn load_reads_every_kind_without_selection() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    store.payments.create(&payment("1")).unwrap();
    store
        .payment_orders
        .create(&PaymentOrder {
            number: "2".to_string(),
            user: "User".to_string(),
            ..PaymentOrder::default()
        })
        .unwrap();

    let list = DocumentList::load(&store).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.selected().is_none());
    assert_eq!(list.items()[0].kind(), DocumentKind::PaymentOrder);
    assert_eq!(list.display_texts()[1], "Платёжка от 2023-01-01 номер 1");
}

#[test]
fn add_selects_new_document_and_notifies_listeners() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut list = DocumentList::new();
    list.subscribe(Box::new(Recorder(Arc::clone(&seen))));

    list.add(Document::from(payment("1")));
    list.add(Document::from(payment("2")));

    assert_eq!(list.selected_index(), Some(1));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn list_is_itself_a_creation_listener() {
    let mut list = DocumentList::new();
    list.on_document_created(&Document::from(payment("9")));
    assert_eq!(list.len(), 1);
    assert_eq!(list.selected_index(), Some(0));
}

#[test]
fn select_out_of_range_is_an_error() {
    let mut list = DocumentList::new();
    list.add(Document::from(payment("1")));
    assert!(matches!(
        list.select(3),
        Err(ListError::IndexOutOfRange { index: 3, len: 1 })
    ));
    list.clear_selection();
    assert!(list.selected().is_none());
}

#[test]
fn remove_shifts_selection() {
    let mut list = DocumentList::new();
    list.add(Document::from(payment("1")));
    list.add(Document::from(payment("2")));
    list.add(Document::from(payment("3")));

    list.remove(0).unwrap();
    assert_eq!(list.selected_index(), Some(1));
    list.remove(1).unwrap();
    assert_eq!(list.selected_index(), None);
}

#[test]
fn save_without_selection_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let list = DocumentList::new();
    let err = list
        .save_selected_to_file(dir.path().join("doc.txt"))
        .unwrap_err();
    assert!(matches!(err, ListError::NoSelection));
}

#[test]
fn block_file_export_then_import_persists_and_selects() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");

    let created = store.payments.create(&payment("1")).unwrap();
    let mut list = DocumentList::load(&store).unwrap();
    list.select(0).unwrap();
    list.save_selected_to_file(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().starts_with("Платёжка\nID: "));

    // Importing a block for an id that still exists updates it in place.
    let imported = list.load_from_file(&store, &path).unwrap().clone();
    assert_eq!(imported.id(), created.id);
    assert_eq!(store.payments.list().unwrap().len(), 1);
    assert_eq!(list.len(), 1);
    assert_eq!(list.selected_index(), Some(0));

    // Once the row is gone the same file inserts a fresh document.
    store.payments.delete(created.id.unwrap()).unwrap();
    let reimported = list.load_from_file(&store, &path).unwrap().clone();
    assert_ne!(reimported.id(), created.id);
    assert_eq!(store.payments.list().unwrap().len(), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.selected_index(), Some(1));
}

#[test]
fn reimport_replaces_listed_document_with_stored_changes() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");

    store.payments.create(&payment("1")).unwrap();
    let created = store.payments.create(&payment("2")).unwrap();
    let mut list = DocumentList::load(&store).unwrap();
    list.select(1).unwrap();
    list.save_selected_to_file(&path).unwrap();

    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("Сотрудник: Employee", "Сотрудник: Boris");
    fs::write(&path, edited).unwrap();
    list.select(0).unwrap();

    list.load_from_file(&store, &path).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.selected_index(), Some(1));
    let Document::Payment(listed) = &list.items()[1] else {
        panic!("expected a payment");
    };
    assert_eq!(listed.employee, "Boris");
    assert_eq!(store.payments.get(created.id.unwrap()).unwrap().employee, "Boris");
}

#[test]
fn multiline_field_is_not_written_to_block_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    let mut broken = payment("1");
    broken.employee = "Ann\nSmith".to_string();

    let mut list = DocumentList::new();
    list.add(Document::from(broken));
    let err = list.save_selected_to_file(&path).unwrap_err();

    assert!(matches!(
        err,
        ListError::Service(ServiceError::Codec(CodecError::DelimiterInField {
            field: "Сотрудник"
        }))
    ));
    assert!(!path.exists());
}

#[test]
fn import_of_unknown_title_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "Квитанция\nID: 1\n").unwrap();

    let mut list = DocumentList::new();
    let err = list.load_from_file(&store, &path).unwrap_err();
    assert!(matches!(
        err,
        ListError::Service(ServiceError::Codec(CodecError::UnknownDocumentType(_)))
    ));
    assert!(list.is_empty());
}

#[test]
fn delete_selected_removes_from_store_and_list() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    store.payments.create(&payment("1")).unwrap();
    store.payments.create(&payment("2")).unwrap();

    let mut list = DocumentList::load(&store).unwrap();
    list.select(0).unwrap();
    let removed = list.delete_selected(&store).unwrap();

    assert_eq!(list.len(), 1);
    assert!(list.selected().is_none());
    assert!(store
        .get(DocumentKind::Payment, removed.id().unwrap())
        .unwrap()
        .is_none());
}

#[test]
fn refresh_keeps_selection_by_identity() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    store.payments.create(&payment("1")).unwrap();
    let second = store.payments.create(&payment("2")).unwrap();

    let mut list = DocumentList::load(&store).unwrap();
    list.select(1).unwrap();

    store.invoices.create_or_update(&docdesk_core::Invoice {
        number: "i".to_string(),
        user: "User".to_string(),
        ..Default::default()
    })
    .unwrap();
    list.refresh(&store).unwrap();

    assert_eq!(list.len(), 3);
    assert_eq!(list.selected().unwrap().id(), second.id);
    assert_eq!(list.selected_index(), Some(2));
}
