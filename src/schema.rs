//! Schema module: declares the fields and relationships of a record type.
//!
//! The schema is the compiler's source of truth for each field's runtime kind;
//! handlers query it once per filter instead of inspecting values at build
//! time. Built once at startup via `RecordSchemaBuilder` and shared read-only.

use crate::types::FieldKind;
use crate::QueryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RecordSchema {
    fields: HashMap<String, FieldKind>,
    relations: HashMap<String, RecordSchema>,
}

impl RecordSchema {
    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::new()
    }

    pub fn get_field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    /// Resolves a field's declared kind, failing if the schema does not know it.
    pub fn field_kind(&self, name: &str) -> Result<FieldKind, QueryError> {
        self.get_field_kind(name)
            .ok_or_else(|| QueryError::FieldNotFound(name.to_string()))
    }

    /// Resolves the schema of a named relationship.
    pub fn relation(&self, name: &str) -> Result<&RecordSchema, QueryError> {
        self.relations
            .get(name)
            .ok_or_else(|| QueryError::FieldNotFound(format!("relation '{name}'")))
    }

    pub fn fields(&self) -> &HashMap<String, FieldKind> {
        &self.fields
    }

    pub fn relations(&self) -> &HashMap<String, RecordSchema> {
        &self.relations
    }
}

#[derive(Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: HashMap<String, FieldKind>,
    relations: HashMap<String, RecordSchema>,
}

impl RecordSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn relation(mut self, name: impl Into<String>, schema: RecordSchema) -> Self {
        self.relations.insert(name.into(), schema);
        self
    }

    pub fn build(self) -> RecordSchema {
        RecordSchema {
            fields: self.fields,
            relations: self.relations,
        }
    }
}
