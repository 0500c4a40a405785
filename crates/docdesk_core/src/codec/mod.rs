//! Text formats for importing and exporting documents.
//!
//! # Responsibility
//! - Convert documents to and from the three line-oriented text formats.
//! - Report every malformed input as a typed `CodecError`; never panic.
//!
//! # Invariants
//! - Dates are ISO `YYYY-MM-DD` in every format.
//! - Decimals are written in plain notation and keep their scale.
//! - Codecs never touch storage; ids are carried only by the block format.

pub mod block;
pub mod line;
pub mod record_file;

use crate::model::DATE_FORMAT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

const ISO_DATE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed line: expected {expected} fields, found {found}: `{line}`")]
    MalformedLine {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("failed to parse {context}: invalid {field} value `{value}`")]
    InvalidField {
        field: &'static str,
        value: String,
        context: String,
    },
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` contains a delimiter or line break")]
    DelimiterInField { field: &'static str },
    #[error("unknown document type `{0}`")]
    UnknownDocumentType(String),
    #[error("line {line_no}: {source}")]
    AtLine {
        line_no: usize,
        #[source]
        source: Box<CodecError>,
    },
}

/// Strict ISO date: `%m` and `%d` alone would also take `2023-1-1`.
pub(crate) fn parse_date(field: &'static str, value: &str, context: &str) -> CodecResult<NaiveDate> {
    let invalid = || CodecError::InvalidField {
        field,
        value: value.to_string(),
        context: context.to_string(),
    };
    if value.len() != ISO_DATE_LEN {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

pub(crate) fn parse_decimal(field: &'static str, value: &str, context: &str) -> CodecResult<Decimal> {
    Decimal::from_str(value).map_err(|_| CodecError::InvalidField {
        field,
        value: value.to_string(),
        context: context.to_string(),
    })
}

pub(crate) fn parse_id(value: &str, context: &str) -> CodecResult<Option<i64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| CodecError::InvalidField {
            field: "id",
            value: value.to_string(),
            context: context.to_string(),
        })
}

/// Every format is line oriented, so no written value may span lines.
pub(crate) fn reject_line_break(field: &'static str, value: &str) -> CodecResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(CodecError::DelimiterInField { field });
    }
    Ok(())
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_decimal, parse_id, CodecError};
    use chrono::NaiveDate;

    #[test]
    fn parse_date_requires_zero_padding() {
        assert_eq!(
            parse_date("date", "2023-01-01", "test").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert!(matches!(
            parse_date("date", "2023-1-1", "test"),
            Err(CodecError::InvalidField { field: "date", .. })
        ));
    }

    #[test]
    fn parse_decimal_keeps_scale() {
        let value = parse_decimal("amount", "1.50", "test").unwrap();
        assert_eq!(value.to_string(), "1.50");
    }

    #[test]
    fn parse_id_treats_empty_as_unsaved() {
        assert_eq!(parse_id("", "test").unwrap(), None);
        assert_eq!(parse_id("42", "test").unwrap(), Some(42));
        assert!(matches!(
            parse_id("x", "test"),
            Err(CodecError::InvalidField { field: "id", .. })
        ));
    }
}
