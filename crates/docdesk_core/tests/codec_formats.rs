use chrono::NaiveDate;
use docdesk_core::codec::block::{
    format_block, format_invoice_block, format_payment_block, format_payment_order_block,
    parse_block, parse_invoice_block, parse_payment_order_block,
};
use docdesk_core::codec::line::{
    format_line, format_payment_order_line, parse_invoice_line, parse_line,
    parse_payment_order_line,
};
use docdesk_core::{CodecError, Document, DocumentKind, Invoice, Payment, PaymentOrder};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_invoice() -> Invoice {
    Invoice {
        id: Some(1),
        number: "123".to_string(),
        date: date(2023, 1, 1),
        user: "User".to_string(),
        amount: dec!(100),
        currency: "USD".to_string(),
        currency_rate: dec!(1),
        product: "Product".to_string(),
        quantity: dec!(10),
    }
}

fn sample_payment() -> Payment {
    Payment {
        id: Some(1),
        number: "123".to_string(),
        date: date(2023, 1, 1),
        user: "User".to_string(),
        amount: dec!(100),
        employee: "Employee".to_string(),
    }
}

fn sample_order() -> PaymentOrder {
    PaymentOrder {
        id: Some(1),
        number: "123".to_string(),
        date: date(2023, 1, 1),
        user: "User".to_string(),
        contractor: "Contractor".to_string(),
        amount: dec!(100),
        currency: "USD".to_string(),
        currency_rate: dec!(1),
        commission: dec!(5),
    }
}

#[test]
fn invoice_block_matches_window_format() {
    let expected = [
        "Накладная",
        "ID: 1",
        "Номер: 123",
        "Дата: 2023-01-01",
        "Пользователь: User",
        "Сумма: 100",
        "Валюта: USD",
        "Курс валюты: 1",
        "Товар: Product",
        "Количество: 10",
    ]
    .join("\n");
    assert_eq!(format_invoice_block(&sample_invoice()).unwrap(), expected);
}

#[test]
fn payment_block_matches_window_format() {
    let expected = [
        "Платёжка",
        "ID: 1",
        "Номер: 123",
        "Дата: 2023-01-01",
        "Пользователь: User",
        "Сумма: 100",
        "Сотрудник: Employee",
    ]
    .join("\n");
    assert_eq!(format_payment_block(&sample_payment()).unwrap(), expected);
}

#[test]
fn payment_order_block_uses_capitalised_rate_label() {
    let expected = [
        "Заявка на оплату",
        "ID: 1",
        "Номер: 123",
        "Дата: 2023-01-01",
        "Пользователь: User",
        "Контрагент: Contractor",
        "Сумма: 100",
        "Валюта: USD",
        "Курс Валюты: 1",
        "Комиссия: 5",
    ]
    .join("\n");
    assert_eq!(format_payment_order_block(&sample_order()).unwrap(), expected);
}

#[test]
fn parses_invoice_data_lines() {
    let data = "ID: 1\nНомер: 123\nДата: 2023-01-01\nПользователь: User\nСумма: 100\nВалюта: USD\nКурс валюты: 1\nТовар: Product\nКоличество: 10";
    assert_eq!(parse_invoice_block(data).unwrap(), sample_invoice());
}

#[test]
fn parses_payment_order_data_lines() {
    let data = "ID: 1\nНомер: 123\nДата: 2023-01-01\nПользователь: User\nКонтрагент: Contractor\nСумма: 100\nВалюта: USD\nКурс Валюты: 1\nКомиссия: 5";
    assert_eq!(parse_payment_order_block(data).unwrap(), sample_order());
}

#[test]
fn parse_block_dispatches_on_title_and_survives_crlf() {
    let text = format_payment_block(&sample_payment()).unwrap().replace('\n', "\r\n");
    let parsed = parse_block(&text).unwrap();
    assert_eq!(parsed, Document::Payment(sample_payment()));
}

#[test]
fn block_roundtrip_for_every_kind() {
    let documents = [
        Document::from(sample_invoice()),
        Document::from(sample_payment()),
        Document::from(sample_order()),
    ];
    for document in documents {
        assert_eq!(parse_block(&format_block(&document).unwrap()).unwrap(), document);
    }
}

#[test]
fn unsaved_document_writes_empty_id_and_parses_back_unsaved() {
    let mut invoice = sample_invoice();
    invoice.id = None;
    let text = format_invoice_block(&invoice).unwrap();
    assert!(text.contains("\nID: \n"));
    assert_eq!(
        parse_block(&text).unwrap(),
        Document::Invoice(invoice)
    );
}

#[test]
fn parse_block_rejects_unknown_title() {
    let err = parse_block("Квитанция\nID: 1").unwrap_err();
    assert_eq!(err, CodecError::UnknownDocumentType("Квитанция".to_string()));
}

#[test]
fn parse_block_reports_missing_label() {
    let err = parse_block("Платёжка\nID: 1\nНомер: 5\nДата: 2023-01-01\nПользователь: U\nСумма: 1")
        .unwrap_err();
    assert_eq!(err, CodecError::MissingField { field: "Сотрудник" });
}

#[test]
fn parse_block_reports_bad_decimal() {
    let text = format_payment_block(&sample_payment())
        .unwrap()
        .replace("Сумма: 100", "Сумма: много");
    let err = parse_block(&text).unwrap_err();
    assert!(matches!(err, CodecError::InvalidField { field: "Сумма", .. }));
}

#[test]
fn payment_order_line_matches_field_order() {
    assert_eq!(
        format_payment_order_line(&sample_order()).unwrap(),
        "123,2023-01-01,User,Contractor,100,USD,1,5"
    );
    let parsed = parse_payment_order_line("123,2023-01-01,User,Contractor,100,USD,1,5").unwrap();
    assert_eq!(parsed.id, None);
    assert_eq!(parsed.commission, dec!(5));
}

#[test]
fn invalid_line_values_are_reported_not_panicked() {
    let err = parse_payment_order_line("123,2023-01-01,User,Contractor,invalid,USD,1,5")
        .unwrap_err();
    assert!(err.to_string().contains("failed to parse line"));

    let err = parse_invoice_line("123,01/01/2023,User,100,USD,1,Product,10").unwrap_err();
    assert!(matches!(err, CodecError::InvalidField { field: "date", .. }));
}

#[test]
fn document_level_line_roundtrip_drops_id() {
    let document = Document::from(sample_invoice());
    let line = format_line(&document).unwrap();
    let parsed = parse_line(DocumentKind::Invoice, &line).unwrap();
    let mut expected = sample_invoice();
    expected.id = None;
    assert_eq!(parsed, Document::Invoice(expected));
}

#[test]
fn document_serializes_with_kind_tag_and_string_decimals() {
    let json = serde_json::to_value(Document::from(sample_order())).unwrap();
    assert_eq!(json["kind"], "payment_order");
    assert_eq!(json["date"], "2023-01-01");
    assert_eq!(json["commission"], "5");
    assert_eq!(json["id"], 1);
}
