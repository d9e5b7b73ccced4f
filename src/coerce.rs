//! Coercion module: converts wire-format scalars into typed field values.
//!
//! Wire values arrive either as text (JSON strings) or as already-parsed
//! instants. `coerce` turns either form into the `TypedValue` matching the
//! target field's declared kind, or fails with a named error. The function is
//! pure and total: there is no silent null/default success path.

use crate::types::{FieldKind, TypedValue};
use crate::QueryError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wire-format scalar awaiting coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Text(String),
    Instant(DateTime<Utc>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(i: DateTime<Utc>) -> Self {
        RawValue::Instant(i)
    }
}

/// Coerces a raw wire value to the target field kind.
///
/// Text sources parse per kind (numeric text, case-insensitive "true"/"false",
/// ISO-8601 temporals); instant sources convert directly to the temporal kinds
/// and are unsupported for everything else.
pub fn coerce(kind: FieldKind, raw: &RawValue) -> Result<TypedValue, QueryError> {
    match raw {
        RawValue::Text(s) => coerce_text(kind, s),
        RawValue::Instant(i) => coerce_instant(kind, *i),
    }
}

fn coerce_text(kind: FieldKind, s: &str) -> Result<TypedValue, QueryError> {
    match kind {
        FieldKind::Int => s
            .parse::<i32>()
            .map(TypedValue::Int)
            .map_err(|_| invalid(kind, s)),
        FieldKind::Long => s
            .parse::<i64>()
            .map(TypedValue::Long)
            .map_err(|_| invalid(kind, s)),
        FieldKind::Float => s
            .parse::<f32>()
            .map(TypedValue::Float)
            .map_err(|_| invalid(kind, s)),
        FieldKind::Double => s
            .parse::<f64>()
            .map(TypedValue::Double)
            .map_err(|_| invalid(kind, s)),
        FieldKind::Decimal => s
            .parse::<Decimal>()
            .map(TypedValue::Decimal)
            .map_err(|_| invalid(kind, s)),
        // Only literal "true"/"false" (any case) are accepted. Anything else is
        // an error rather than a silent false.
        FieldKind::Bool => {
            if s.eq_ignore_ascii_case("true") {
                Ok(TypedValue::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Ok(TypedValue::Bool(false))
            } else {
                Err(invalid(kind, s))
            }
        }
        FieldKind::Text => Ok(TypedValue::Text(s.to_string())),
        FieldKind::Timestamp => parse_instant(s)
            .map(TypedValue::Timestamp)
            .ok_or_else(|| invalid(kind, s)),
        FieldKind::Instant => parse_instant(s)
            .map(TypedValue::Instant)
            .ok_or_else(|| invalid(kind, s)),
        // Strict ISO local date-time first; callers may also send an offset
        // instant form, which falls back to the UTC wall-clock reading.
        FieldKind::LocalDateTime => s
            .parse::<NaiveDateTime>()
            .ok()
            .or_else(|| parse_instant(s).map(|i| i.naive_utc()))
            .map(TypedValue::LocalDateTime)
            .ok_or_else(|| invalid(kind, s)),
        // ISO calendar date first; an instant form falls back to its UTC date.
        FieldKind::Date => s
            .parse::<NaiveDate>()
            .ok()
            .or_else(|| parse_instant(s).map(|i| i.date_naive()))
            .map(TypedValue::Date)
            .ok_or_else(|| invalid(kind, s)),
    }
}

fn coerce_instant(kind: FieldKind, instant: DateTime<Utc>) -> Result<TypedValue, QueryError> {
    match kind {
        FieldKind::Timestamp => Ok(TypedValue::Timestamp(instant)),
        FieldKind::Instant => Ok(TypedValue::Instant(instant)),
        FieldKind::LocalDateTime => Ok(TypedValue::LocalDateTime(instant.naive_utc())),
        FieldKind::Date => Ok(TypedValue::Date(instant.date_naive())),
        other => Err(QueryError::UnsupportedType(format!(
            "cannot coerce an instant to non-temporal kind {other}"
        ))),
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn invalid(kind: FieldKind, raw: &str) -> QueryError {
    QueryError::InvalidValue(format!("value '{raw}' is not a valid {kind}"))
}
