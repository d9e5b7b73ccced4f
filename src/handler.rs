//! Handler module: per-filter-kind strategies that build predicate fragments.
//!
//! Each handler resolves the target field's declared kind from the schema,
//! coerces the filter's wire value(s) up front, and returns a closure that
//! only compares already-typed values. Every error a bad filter can cause is
//! raised here, at build time, never during evaluation.

use crate::coerce::{coerce, RawValue};
use crate::criteria::{BasicOperator, DateTimeOperator, Filter, FilterKind};
use crate::predicate::Predicate;
use crate::schema::RecordSchema;
use crate::types::TypedValue;
use crate::QueryError;
use std::cmp::Ordering;

/// Strategy for translating one filter kind into a `Predicate`.
pub trait FilterHandler: Send + Sync {
    /// The filter kind this handler serves; used as its registry key.
    fn kind(&self) -> FilterKind;

    fn handle(&self, filter: &Filter, schema: &RecordSchema) -> Result<Predicate, QueryError>;
}

/// Equality fragment against a pre-coerced value.
fn equals(field: &str, value: TypedValue) -> Predicate {
    let field = field.to_string();
    Predicate::new(move |r| r.get(&field) == Some(&value))
}

/// Ordering fragment against a pre-coerced value. A record missing the field,
/// or holding a differently-typed value, never satisfies the fragment.
fn compares(field: &str, value: TypedValue, accept: fn(Ordering) -> bool) -> Predicate {
    let field = field.to_string();
    Predicate::new(move |r| {
        r.get(&field)
            .and_then(|v| v.partial_cmp_same_kind(&value))
            .map(accept)
            .unwrap_or(false)
    })
}

fn wrong_variant(expected: FilterKind, got: FilterKind) -> QueryError {
    QueryError::TypeMismatch(format!("{expected} handler received a {got} filter"))
}

/// Handles EQUAL/NOT_EQUAL and the four ordering operators on scalar fields.
pub struct BasicFilterHandler;

impl FilterHandler for BasicFilterHandler {
    fn kind(&self) -> FilterKind {
        FilterKind::Basic
    }

    fn handle(&self, filter: &Filter, schema: &RecordSchema) -> Result<Predicate, QueryError> {
        let Filter::Basic { field, operator, value } = filter else {
            return Err(wrong_variant(FilterKind::Basic, filter.kind()));
        };
        let kind = schema.field_kind(field)?;
        // One coercion per filter; ordering operators reuse the same typed
        // value in both the strict and the equality branch.
        let coerced = coerce(kind, &RawValue::Text(value.clone()))?;

        let require_numeric = |coerced: &TypedValue| -> Result<(), QueryError> {
            if coerced.is_numeric() {
                Ok(())
            } else {
                Err(QueryError::TypeMismatch(format!(
                    "ordering comparison on field '{field}' requires a numeric kind, got {kind}"
                )))
            }
        };

        let predicate = match operator {
            BasicOperator::Equal => equals(field, coerced),
            BasicOperator::NotEqual => equals(field, coerced).not(),
            BasicOperator::GreaterThan => {
                require_numeric(&coerced)?;
                compares(field, coerced, Ordering::is_gt)
            }
            BasicOperator::LessThan => {
                require_numeric(&coerced)?;
                compares(field, coerced, Ordering::is_lt)
            }
            BasicOperator::GreaterThanOrEqual => {
                require_numeric(&coerced)?;
                compares(field, coerced.clone(), Ordering::is_gt).or(equals(field, coerced))
            }
            BasicOperator::LessThanOrEqual => {
                require_numeric(&coerced)?;
                compares(field, coerced.clone(), Ordering::is_lt).or(equals(field, coerced))
            }
        };
        Ok(predicate)
    }
}

/// Handles the inclusive temporal range operator.
///
/// Start/end ordering is not validated: an inverted range simply matches
/// nothing, the same way the storage comparison would treat it.
pub struct BetweenFilterHandler;

impl FilterHandler for BetweenFilterHandler {
    fn kind(&self) -> FilterKind {
        FilterKind::Between
    }

    fn handle(&self, filter: &Filter, schema: &RecordSchema) -> Result<Predicate, QueryError> {
        let Filter::Between {
            field,
            operator: _,
            start_date_time,
            end_date_time,
        } = filter
        else {
            return Err(wrong_variant(FilterKind::Between, filter.kind()));
        };
        let kind = temporal_kind(schema, field)?;
        let start = coerce(kind, &RawValue::Instant(*start_date_time))?;
        let end = coerce(kind, &RawValue::Instant(*end_date_time))?;
        Ok(compares(field, start, Ordering::is_ge).and(compares(field, end, Ordering::is_le)))
    }
}

/// Handles membership (`IN`) filters.
pub struct ContainsFilterHandler;

impl FilterHandler for ContainsFilterHandler {
    fn kind(&self) -> FilterKind {
        FilterKind::Contains
    }

    fn handle(&self, filter: &Filter, schema: &RecordSchema) -> Result<Predicate, QueryError> {
        let Filter::Contains { field, operator: _, values } = filter else {
            return Err(wrong_variant(FilterKind::Contains, filter.kind()));
        };
        let kind = schema.field_kind(field)?;
        // Each element is coerced individually; the membership set holds typed
        // values, never the raw string list as one opaque value.
        let coerced = values
            .iter()
            .map(|raw| coerce(kind, &RawValue::Text(raw.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        if coerced.is_empty() {
            return Ok(Predicate::never());
        }
        let field = field.clone();
        Ok(Predicate::new(move |r| {
            r.get(&field).map(|v| coerced.contains(v)).unwrap_or(false)
        }))
    }
}

/// Handles temporal ordering/equality operators on timestamp, local date-time,
/// date-only, and generic instant fields.
pub struct DateTimeFilterHandler;

impl FilterHandler for DateTimeFilterHandler {
    fn kind(&self) -> FilterKind {
        FilterKind::DateTime
    }

    fn handle(&self, filter: &Filter, schema: &RecordSchema) -> Result<Predicate, QueryError> {
        let Filter::DateTime { field, operator, value } = filter else {
            return Err(wrong_variant(FilterKind::DateTime, filter.kind()));
        };
        let kind = temporal_kind(schema, field)?;
        // NOT_EQUAL coerces exactly like EQUAL.
        let coerced = coerce(kind, &RawValue::Instant(*value))?;
        let predicate = match operator {
            DateTimeOperator::After => compares(field, coerced, Ordering::is_gt),
            DateTimeOperator::AfterOrEqual => compares(field, coerced, Ordering::is_ge),
            DateTimeOperator::Before => compares(field, coerced, Ordering::is_lt),
            DateTimeOperator::BeforeOrEqual => compares(field, coerced, Ordering::is_le),
            DateTimeOperator::Equal => equals(field, coerced),
            DateTimeOperator::NotEqual => equals(field, coerced).not(),
        };
        Ok(predicate)
    }
}

fn temporal_kind(schema: &RecordSchema, field: &str) -> Result<crate::types::FieldKind, QueryError> {
    let kind = schema.field_kind(field)?;
    if kind.is_temporal() {
        Ok(kind)
    } else {
        Err(QueryError::UnsupportedTemporalType(format!(
            "temporal comparison only supported on Timestamp/LocalDateTime/Date/Instant; \
             field '{field}' has kind {kind}"
        )))
    }
}
