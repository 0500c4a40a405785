use chrono::NaiveDate;
use docdesk_core::db::open_db_in_memory;
use docdesk_core::{CodecError, DocumentStore, Invoice, Payment, PaymentOrder, ServiceError};
use rust_decimal_macros::dec;
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn payment_record_file_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payment.txt");

    let payment = Payment {
        id: Some(4),
        number: "42".to_string(),
        date: date(2023, 5, 6),
        user: "alice".to_string(),
        amount: dec!(12.30),
        employee: "bob".to_string(),
    };
    store.payments.save_to_file(&payment, &path).unwrap();

    let loaded = store.payments.load_from_file(&path).unwrap();
    assert_eq!(loaded.id, None);
    assert_eq!(loaded.amount.to_string(), "12.30");
    assert_eq!(loaded.employee, "bob");
}

#[test]
fn payment_order_record_file_uses_english_labels() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.txt");

    let order = PaymentOrder {
        id: None,
        number: "7".to_string(),
        date: date(2023, 1, 1),
        user: "User".to_string(),
        contractor: "ACME".to_string(),
        amount: dec!(100),
        currency: "EUR".to_string(),
        currency_rate: dec!(0.9),
        commission: dec!(0.2),
    };
    store.payment_orders.save_to_file(&order, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Number: 7\nDate: 2023-01-01\nUser: User\nContractor: ACME\nAmount: 100\nCurrency: EUR\nCurrency Rate: 0.9\nCommission: 0.2\n"
    );
    assert_eq!(store.payment_orders.load_from_file(&path).unwrap(), order);
}

#[test]
fn record_file_refuses_multiline_field() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payment.txt");

    let payment = Payment {
        id: None,
        number: "42".to_string(),
        date: date(2023, 5, 6),
        user: "alice".to_string(),
        amount: dec!(1),
        employee: "Ann\nSmith".to_string(),
    };
    let err = store.payments.save_to_file(&payment, &path).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Codec(CodecError::DelimiterInField { field: "Employee" })
    ));
    assert!(!path.exists());
}

#[test]
fn invoice_load_from_missing_file_is_a_file_error() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid_file.txt");

    let err = store.invoices.load_from_file(&path).unwrap_err();
    match err {
        ServiceError::File { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn import_lines_stores_every_record() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoices.csv");
    fs::write(
        &path,
        "123,2023-01-01,User,100,USD,1,Product,10\n\n124,2023-01-02,User2,200,EUR,0.9,Product2,20\n",
    )
    .unwrap();

    let ids = store.invoices.import_lines(&path).unwrap();
    assert_eq!(ids.len(), 2);

    let invoices: Vec<Invoice> = store.invoices.list().unwrap();
    assert_eq!(invoices[1].currency_rate, dec!(0.9));
    assert_eq!(invoices[1].product, "Product2");
}

#[test]
fn import_lines_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payments.csv");
    fs::write(&path, "1,2023-01-01,User,100,E\n2,2023-01-01, ,100,E\n").unwrap();

    let err = store.payments.import_lines(&path).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert!(store.payments.list().unwrap().is_empty());

    fs::write(&path, "1,2023-01-01,User,100,E\n2,2023-01-01,User\n").unwrap();
    let err = store.payments.import_lines(&path).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Codec(CodecError::AtLine { line_no: 2, .. })
    ));
    assert!(store.payments.list().unwrap().is_empty());
}

#[test]
fn export_lines_writes_one_line_per_document() {
    let conn = open_db_in_memory().unwrap();
    let store = DocumentStore::new(&conn);
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.csv");
    let target = dir.path().join("out.csv");
    let lines = "1,2023-01-01,User,Contractor,100,USD,1,5\n2,2023-02-01,User,Other,50.5,EUR,0.9,0\n";
    fs::write(&source, lines).unwrap();

    store.payment_orders.import_lines(&source).unwrap();
    let written = store.payment_orders.export_lines(&target).unwrap();

    assert_eq!(written, 2);
    assert_eq!(fs::read_to_string(&target).unwrap(), lines);
}
