//! Record module: the runtime value container predicates evaluate against.
//!
//! A `Record` is a schema-validated bag of typed attribute values plus the
//! related records reachable through named relationships. It is the unit a
//! `RecordStore` holds.

use crate::schema::RecordSchema;
use crate::types::TypedValue;
use crate::QueryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: i64,
    values: HashMap<String, TypedValue>,
    relations: HashMap<String, Vec<Record>>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            values: HashMap::new(),
            relations: HashMap::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Sets an attribute value, enforcing the schema's declared kind.
    pub fn set(&mut self, field: &str, value: TypedValue, schema: &RecordSchema) -> Result<(), QueryError> {
        let expected = schema.field_kind(field)?;
        if value.kind() != expected {
            return Err(QueryError::TypeMismatch(format!(
                "field '{field}' expects {expected}, got {}",
                value.kind()
            )));
        }
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.values.get(field)
    }

    /// Attaches a related record under a named relationship.
    pub fn add_related(&mut self, relation: &str, record: Record, schema: &RecordSchema) -> Result<(), QueryError> {
        schema.relation(relation)?;
        self.relations.entry(relation.to_string()).or_default().push(record);
        Ok(())
    }

    /// Records reachable through the named relationship (empty if none attached).
    pub fn related(&self, relation: &str) -> &[Record] {
        self.relations.get(relation).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn values(&self) -> &HashMap<String, TypedValue> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordSchemaBuilder;
    use crate::types::FieldKind;

    fn schema() -> RecordSchema {
        RecordSchemaBuilder::new()
            .field("age", FieldKind::Int)
            .field("status", FieldKind::Text)
            .relation(
                "addresses",
                RecordSchemaBuilder::new().field("city", FieldKind::Text).build(),
            )
            .build()
    }

    #[test]
    fn test_set_and_get_value() {
        let sch = schema();
        let mut rec = Record::new(1);
        rec.set("age", TypedValue::Int(42), &sch).unwrap();
        assert_eq!(rec.get("age"), Some(&TypedValue::Int(42)));
        assert_eq!(rec.id(), 1);
    }

    #[test]
    fn test_type_checking() {
        let sch = schema();
        let mut rec = Record::new(1);
        let res = rec.set("age", TypedValue::Text("not an int".into()), &sch);
        assert!(matches!(res, Err(QueryError::TypeMismatch(_))));
        assert!(rec.set("age", TypedValue::Int(1), &sch).is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let sch = schema();
        let mut rec = Record::new(1);
        let res = rec.set("unknown", TypedValue::Int(1), &sch);
        assert!(matches!(res, Err(QueryError::FieldNotFound(_))));
    }

    #[test]
    fn test_related_records() {
        let sch = schema();
        let address_schema = sch.relation("addresses").unwrap().clone();
        let mut address = Record::new(10);
        address.set("city", TypedValue::Text("Oslo".into()), &address_schema).unwrap();

        let mut rec = Record::new(1);
        rec.add_related("addresses", address, &sch).unwrap();
        assert_eq!(rec.related("addresses").len(), 1);
        assert!(rec.related("orders").is_empty());
        assert!(rec.add_related("orders", Record::new(11), &sch).is_err());
    }
}
