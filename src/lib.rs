//! Queryspec: a composable criteria-to-predicate query compiler for typed records.
//!
//! The crate sits between an API layer and a storage layer: it takes a
//! structured search criteria object (filters, join constraints, sort
//! directives, paging) and compiles it into a single composable predicate a
//! record store can execute.
//!
//! # Architecture
//! - Schema definition (field kinds, relationships)
//! - Wire-level criteria model (filters, joins, paging, sort)
//! - Value coercion (wire strings/instants into typed field values)
//! - Per-kind filter handlers dispatched through a startup-built registry
//! - Query planning (predicate + page request) and a DAO facade over a store

mod coerce;
mod criteria;
mod handler;
mod plan;
mod predicate;
mod record;
mod registry;
mod schema;
mod store;
mod types;

pub use coerce::*;
pub use criteria::*;
pub use handler::*;
pub use plan::*;
pub use predicate::*;
pub use record::*;
pub use registry::*;
pub use schema::*;
pub use store::*;
pub use types::*;

use thiserror::Error;

/// Unified error type for queryspec operations.
///
/// Every variant is raised at predicate-construction or lookup time, never
/// during predicate evaluation, so callers can reject bad requests before the
/// storage engine is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// A wire value could not be parsed as the target field kind.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// The target kind has no coercion rule for the given source.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// A temporal filter targets a field whose kind is not a temporal subtype.
    #[error("unsupported temporal type: {0}")]
    UnsupportedTemporalType(String),
    /// The coerced value cannot be used with the requested comparison.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// No handler is registered for the filter's kind.
    #[error("no handler registered for filter kind: {0}")]
    UnregisteredFilterKind(String),
    /// Page index or size out of range.
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
    /// Lookup-by-id miss.
    #[error("not found: {0}")]
    NotFound(String),
    /// A filter or join names an attribute the schema does not declare.
    #[error("field not found: {0}")]
    FieldNotFound(String),
}
