//! Types module: declared field kinds and runtime typed values.
//!
//! `FieldKind` is what a schema declares for a record attribute; `TypedValue`
//! is the runtime value living on a record. The two enums mirror each other
//! variant-for-variant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The declared type of a record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FieldKind {
    Int,
    Long,
    Float,
    Double,
    Decimal,
    Bool,
    Text,
    /// Point-in-time with explicit UTC offset semantics.
    Timestamp,
    /// Wall-clock date-time without offset.
    LocalDateTime,
    /// Calendar date without time-of-day.
    Date,
    /// Generic point-in-time (the loosest temporal kind).
    Instant,
}

impl FieldKind {
    /// Whether values of this kind support strict ordering comparisons (GT/LT).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Int | FieldKind::Long | FieldKind::Float | FieldKind::Double | FieldKind::Decimal
        )
    }

    /// Whether this kind is one of the supported temporal subtypes.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldKind::Timestamp | FieldKind::LocalDateTime | FieldKind::Date | FieldKind::Instant
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Int => "Int",
            FieldKind::Long => "Long",
            FieldKind::Float => "Float",
            FieldKind::Double => "Double",
            FieldKind::Decimal => "Decimal",
            FieldKind::Bool => "Bool",
            FieldKind::Text => "Text",
            FieldKind::Timestamp => "Timestamp",
            FieldKind::LocalDateTime => "LocalDateTime",
            FieldKind::Date => "Date",
            FieldKind::Instant => "Instant",
        };
        f.write_str(name)
    }
}

/// A runtime value carried by a record attribute or produced by coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TypedValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Bool(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

impl TypedValue {
    /// The kind this value inhabits.
    pub fn kind(&self) -> FieldKind {
        match self {
            TypedValue::Int(_) => FieldKind::Int,
            TypedValue::Long(_) => FieldKind::Long,
            TypedValue::Float(_) => FieldKind::Float,
            TypedValue::Double(_) => FieldKind::Double,
            TypedValue::Decimal(_) => FieldKind::Decimal,
            TypedValue::Bool(_) => FieldKind::Bool,
            TypedValue::Text(_) => FieldKind::Text,
            TypedValue::Timestamp(_) => FieldKind::Timestamp,
            TypedValue::LocalDateTime(_) => FieldKind::LocalDateTime,
            TypedValue::Date(_) => FieldKind::Date,
            TypedValue::Instant(_) => FieldKind::Instant,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn is_temporal(&self) -> bool {
        self.kind().is_temporal()
    }

    /// Ordering within a single variant. Cross-variant comparisons yield `None`,
    /// so a mistyped comparison is never silently satisfied.
    pub fn partial_cmp_same_kind(&self, other: &TypedValue) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Int(a), TypedValue::Int(b)) => a.partial_cmp(b),
            (TypedValue::Long(a), TypedValue::Long(b)) => a.partial_cmp(b),
            (TypedValue::Float(a), TypedValue::Float(b)) => a.partial_cmp(b),
            (TypedValue::Double(a), TypedValue::Double(b)) => a.partial_cmp(b),
            (TypedValue::Decimal(a), TypedValue::Decimal(b)) => a.partial_cmp(b),
            (TypedValue::Bool(a), TypedValue::Bool(b)) => a.partial_cmp(b),
            (TypedValue::Text(a), TypedValue::Text(b)) => a.partial_cmp(b),
            (TypedValue::Timestamp(a), TypedValue::Timestamp(b)) => a.partial_cmp(b),
            (TypedValue::LocalDateTime(a), TypedValue::LocalDateTime(b)) => a.partial_cmp(b),
            (TypedValue::Date(a), TypedValue::Date(b)) => a.partial_cmp(b),
            (TypedValue::Instant(a), TypedValue::Instant(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_kind_predicates() {
        assert!(FieldKind::Int.is_numeric());
        assert!(FieldKind::Decimal.is_numeric());
        assert!(!FieldKind::Text.is_numeric());
        assert!(FieldKind::Timestamp.is_temporal());
        assert!(FieldKind::Date.is_temporal());
        assert!(!FieldKind::Long.is_temporal());
    }

    #[test]
    fn test_typed_value_kind() {
        assert_eq!(TypedValue::Int(1).kind(), FieldKind::Int);
        assert_eq!(TypedValue::Text("x".into()).kind(), FieldKind::Text);
        let ts = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(TypedValue::Timestamp(ts).kind(), FieldKind::Timestamp);
        assert_eq!(TypedValue::Instant(ts).kind(), FieldKind::Instant);
    }

    #[test]
    fn test_same_kind_ordering() {
        assert_eq!(
            TypedValue::Int(1).partial_cmp_same_kind(&TypedValue::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            TypedValue::Text("b".into()).partial_cmp_same_kind(&TypedValue::Text("a".into())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_cross_kind_ordering_is_none() {
        assert_eq!(
            TypedValue::Int(1).partial_cmp_same_kind(&TypedValue::Long(1)),
            None
        );
        let ts = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(
            TypedValue::Timestamp(ts).partial_cmp_same_kind(&TypedValue::Instant(ts)),
            None
        );
    }

    #[test]
    fn test_serialization_deserialization() {
        let val = TypedValue::Decimal(Decimal::new(12345, 2));
        let json = serde_json::to_string(&val).unwrap();
        let deser: TypedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deser);
    }
}
