//! Criteria module: the wire-level query descriptors supplied by callers.
//!
//! These are immutable value objects, typically deserialized from a request
//! body, consumed once by the query planner and then discarded. Wire names
//! follow the JSON convention of the surrounding service: a `type` tag with
//! SCREAMING_SNAKE_CASE filter kinds and operators, camelCase members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying a filter variant; the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum FilterKind {
    Basic,
    Between,
    Contains,
    DateTime,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Basic => "BASIC",
            FilterKind::Between => "BETWEEN",
            FilterKind::Contains => "CONTAINS",
            FilterKind::DateTime => "DATE_TIME",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BasicOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BetweenOperator {
    Between,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ContainsOperator {
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum DateTimeOperator {
    After,
    AfterOrEqual,
    Before,
    BeforeOrEqual,
    Equal,
    NotEqual,
}

/// A single field/operator/value(s) constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Filter {
    Basic {
        field: String,
        operator: BasicOperator,
        value: String,
    },
    #[serde(rename_all = "camelCase")]
    Between {
        field: String,
        operator: BetweenOperator,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
    },
    Contains {
        field: String,
        operator: ContainsOperator,
        values: Vec<String>,
    },
    DateTime {
        field: String,
        operator: DateTimeOperator,
        value: DateTime<Utc>,
    },
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Basic { .. } => FilterKind::Basic,
            Filter::Between { .. } => FilterKind::Between,
            Filter::Contains { .. } => FilterKind::Contains,
            Filter::DateTime { .. } => FilterKind::DateTime,
        }
    }

    /// Name of the record attribute this filter targets.
    pub fn field(&self) -> &str {
        match self {
            Filter::Basic { field, .. }
            | Filter::Between { field, .. }
            | Filter::Contains { field, .. }
            | Filter::DateTime { field, .. } => field,
        }
    }

    pub fn basic(field: impl Into<String>, operator: BasicOperator, value: impl Into<String>) -> Self {
        Filter::Basic {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn between(field: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Filter::Between {
            field: field.into(),
            operator: BetweenOperator::Between,
            start_date_time: start,
            end_date_time: end,
        }
    }

    pub fn contains(field: impl Into<String>, values: Vec<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            operator: ContainsOperator::In,
            values,
        }
    }

    pub fn date_time(field: impl Into<String>, operator: DateTimeOperator, value: DateTime<Utc>) -> Self {
        Filter::DateTime {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// Constrains records through a named relationship: the joined record's
/// attribute must satisfy the embedded filter (currently basic equality only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinConstraint {
    /// Name of the to-one/to-many relationship to traverse.
    pub join: String,
    pub filter: Filter,
}

/// A full query request: filters and joins, each AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub joins: Vec<JoinConstraint>,
}

/// Primary/secondary sort keys. Both lists keep their internal order;
/// ascending keys always precede descending keys in the built ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub ascending: Vec<String>,
    #[serde(default)]
    pub descending: Vec<String>,
}

/// `Criteria` plus paging and sorting.
///
/// `page` and `size` are signed so that out-of-range wire values surface as
/// `InvalidPageRequest` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageableCriteria {
    #[serde(flatten)]
    pub criteria: Criteria,
    pub page: i64,
    pub size: i64,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}
