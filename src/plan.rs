//! Plan module: composes criteria into one predicate plus page/sort parameters.
//!
//! The planner is the single entry point the facade uses: it dispatches each
//! filter through the handler registry, builds join fragments, AND-combines
//! everything, and validates paging input. It holds only shared read-only
//! state and is freely usable from concurrent request tasks.

use crate::criteria::{Criteria, Filter, JoinConstraint, PageableCriteria};
use crate::predicate::Predicate;
use crate::registry::HandlerRegistry;
use crate::schema::RecordSchema;
use crate::types::TypedValue;
use crate::QueryError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key of a page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Validated paging parameters handed to the storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    /// Sort keys in precedence order; empty means natural/unspecified order.
    pub orders: Vec<SortOrder>,
}

impl PageRequest {
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            orders: Vec::new(),
        }
    }

    /// Saturates instead of overflowing: an offset past `usize::MAX` can only
    /// ever address an empty page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// Builds query plans for one record type.
pub struct QueryPlanner {
    schema: Arc<RecordSchema>,
    registry: Arc<HandlerRegistry>,
}

impl QueryPlanner {
    pub fn new(schema: Arc<RecordSchema>, registry: Arc<HandlerRegistry>) -> Self {
        Self { schema, registry }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// AND-combines all filter fragments with all join fragments. Empty
    /// criteria produce a match-all predicate.
    pub fn build_predicate(&self, criteria: &Criteria) -> Result<Predicate, QueryError> {
        let mut predicate = Predicate::always();
        for filter in &criteria.filters {
            let handler = self.registry.lookup(filter.kind())?;
            predicate = predicate.and(handler.handle(filter, &self.schema)?);
        }
        for join in &criteria.joins {
            predicate = predicate.and(self.join_predicate(join)?);
        }
        log::debug!(
            "built predicate from {} filter(s) and {} join(s)",
            criteria.filters.len(),
            criteria.joins.len()
        );
        Ok(predicate)
    }

    /// Traverses the named relationship and applies a raw equality constraint
    /// on the joined record's attribute: the fragment is satisfied when any
    /// related record carries the literal value. Only basic filters are
    /// accepted on the joined side; richer joined-side filtering is future
    /// work.
    fn join_predicate(&self, constraint: &JoinConstraint) -> Result<Predicate, QueryError> {
        let joined_schema = self.schema.relation(&constraint.join)?;
        let Filter::Basic { field, operator: _, value } = &constraint.filter else {
            return Err(QueryError::TypeMismatch(format!(
                "join constraint on '{}' supports only basic equality filters, got {}",
                constraint.join,
                constraint.filter.kind()
            )));
        };
        joined_schema.field_kind(field)?;
        let relation = constraint.join.clone();
        let field = field.clone();
        // Raw equality: the literal stays a text value, no coercion on the
        // joined side in the current contract.
        let literal = TypedValue::Text(value.clone());
        Ok(Predicate::new(move |r| {
            r.related(&relation).iter().any(|j| j.get(&field) == Some(&literal))
        }))
    }

    /// Validates paging input and maps the sort spec onto ordered sort keys:
    /// all ascending keys first (in list order), then all descending keys.
    pub fn build_page(&self, criteria: &PageableCriteria) -> Result<PageRequest, QueryError> {
        if criteria.page < 0 || criteria.size < 1 {
            log::warn!(
                "rejecting page request: page={} size={}",
                criteria.page,
                criteria.size
            );
            return Err(QueryError::InvalidPageRequest(format!(
                "page must be >= 0 and size >= 1, got page={} size={}",
                criteria.page, criteria.size
            )));
        }
        let mut orders = Vec::new();
        if let Some(sort) = &criteria.sort {
            orders.extend(sort.ascending.iter().map(|f| SortOrder::asc(f.as_str())));
            orders.extend(sort.descending.iter().map(|f| SortOrder::desc(f.as_str())));
        }
        Ok(PageRequest {
            page: criteria.page as usize,
            size: criteria.size as usize,
            orders,
        })
    }
}
