//! Store module: the storage-engine seam and the DAO facade callers use.
//!
//! `RecordStore` is the contract a storage engine implements: it executes
//! already-built predicates and paging, and owns all I/O concerns. The
//! bundled `MemoryStore` is the reference engine used by tests and demos.
//! `Dao` is the facade composing the planner with a store.

use crate::criteria::{Criteria, PageableCriteria};
use crate::plan::{PageRequest, QueryPlanner, SortDirection, SortOrder};
use crate::predicate::Predicate;
use crate::record::Record;
use crate::QueryError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One page of query results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
}

impl<T> PageOf<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size as u64)
    }
}

/// Storage-engine contract: executes built predicates against its records.
pub trait RecordStore {
    fn find_by_id(&self, id: i64) -> Option<Record>;
    fn find_all(&self) -> Vec<Record>;
    fn count(&self) -> u64;
    fn exists_by_id(&self, id: i64) -> bool;
    /// Inserts or replaces by record id and returns the stored record.
    fn save(&mut self, record: Record) -> Record;
    fn find_matching(&self, predicate: &Predicate) -> Vec<Record>;
    fn find_matching_page(&self, predicate: &Predicate, page: &PageRequest) -> PageOf<Record>;
}

/// In-memory reference engine backed by a `BTreeMap` keyed on record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<i64, Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_matching(&self, predicate: &Predicate, orders: &[SortOrder]) -> Vec<Record> {
        let mut matches: Vec<Record> = self
            .records
            .values()
            .filter(|r| predicate.test(r))
            .cloned()
            .collect();
        if !orders.is_empty() {
            matches.sort_by(|a, b| compare_records(a, b, orders));
        }
        matches
    }
}

fn compare_records(a: &Record, b: &Record, orders: &[SortOrder]) -> Ordering {
    for order in orders {
        let ord = match (a.get(&order.field), b.get(&order.field)) {
            (Some(x), Some(y)) => x.partial_cmp_same_kind(y).unwrap_or(Ordering::Equal),
            // Records missing the sort key group before those carrying it.
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ord = match order.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    // Stable tie-break so paging never reshuffles equal keys.
    a.id().cmp(&b.id())
}

impl RecordStore for MemoryStore {
    fn find_by_id(&self, id: i64) -> Option<Record> {
        self.records.get(&id).cloned()
    }

    fn find_all(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    fn count(&self) -> u64 {
        self.records.len() as u64
    }

    fn exists_by_id(&self, id: i64) -> bool {
        self.records.contains_key(&id)
    }

    fn save(&mut self, record: Record) -> Record {
        self.records.insert(record.id(), record.clone());
        record
    }

    fn find_matching(&self, predicate: &Predicate) -> Vec<Record> {
        self.sorted_matching(predicate, &[])
    }

    fn find_matching_page(&self, predicate: &Predicate, page: &PageRequest) -> PageOf<Record> {
        let matches = self.sorted_matching(predicate, &page.orders);
        let total_elements = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();
        PageOf {
            items,
            page: page.page,
            size: page.size,
            total_elements,
        }
    }
}

/// Facade exposing CRUD passthrough plus criteria-driven querying.
pub struct Dao<S: RecordStore> {
    store: S,
    planner: QueryPlanner,
}

impl<S: RecordStore> Dao<S> {
    pub fn new(store: S, planner: QueryPlanner) -> Self {
        Self { store, planner }
    }

    pub fn find_by_id(&self, id: i64) -> Result<Record, QueryError> {
        self.store
            .find_by_id(id)
            .ok_or_else(|| QueryError::NotFound(format!("record not found: {id}")))
    }

    pub fn find_all(&self) -> Vec<Record> {
        self.store.find_all()
    }

    pub fn find_page(&self, page: &PageRequest) -> PageOf<Record> {
        self.store.find_matching_page(&Predicate::always(), page)
    }

    pub fn count(&self) -> u64 {
        self.store.count()
    }

    pub fn exists_by_id(&self, id: i64) -> bool {
        self.store.exists_by_id(id)
    }

    pub fn save(&mut self, record: Record) -> Record {
        self.store.save(record)
    }

    /// Builds the predicate for the criteria and returns every matching record.
    pub fn query_result(&self, criteria: &Criteria) -> Result<Vec<Record>, QueryError> {
        let predicate = self.planner.build_predicate(criteria)?;
        Ok(self.store.find_matching(&predicate))
    }

    /// Builds predicate and page request, then returns the requested page.
    pub fn query_result_page(&self, criteria: &PageableCriteria) -> Result<PageOf<Record>, QueryError> {
        let predicate = self.planner.build_predicate(&criteria.criteria)?;
        let page = self.planner.build_page(criteria)?;
        Ok(self.store.find_matching_page(&predicate, &page))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn planner(&self) -> &QueryPlanner {
        &self.planner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{BasicOperator, Filter, SortSpec};
    use crate::registry::HandlerRegistry;
    use crate::schema::{RecordSchema, RecordSchemaBuilder};
    use crate::types::{FieldKind, TypedValue};
    use std::sync::Arc;

    fn schema() -> RecordSchema {
        RecordSchemaBuilder::new()
            .field("age", FieldKind::Int)
            .field("name", FieldKind::Text)
            .build()
    }

    fn dao() -> Dao<MemoryStore> {
        let schema = Arc::new(schema());
        let planner = QueryPlanner::new(Arc::clone(&schema), Arc::new(HandlerRegistry::with_defaults()));
        let mut dao = Dao::new(MemoryStore::new(), planner);
        for (id, age, name) in [(1, 30, "alice"), (2, 20, "bob"), (3, 40, "carol"), (4, 20, "dave")] {
            let mut rec = Record::new(id);
            rec.set("age", TypedValue::Int(age), &schema).unwrap();
            rec.set("name", TypedValue::Text(name.into()), &schema).unwrap();
            dao.save(rec);
        }
        dao
    }

    #[test]
    fn test_find_by_id_and_not_found() {
        let dao = dao();
        assert_eq!(dao.find_by_id(1).unwrap().id(), 1);
        let err = dao.find_by_id(99).unwrap_err();
        assert!(matches!(err, QueryError::NotFound(_)));
    }

    #[test]
    fn test_count_and_exists() {
        let dao = dao();
        assert_eq!(dao.count(), 4);
        assert!(dao.exists_by_id(2));
        assert!(!dao.exists_by_id(99));
    }

    #[test]
    fn test_save_replaces_by_id() {
        let mut dao = dao();
        let sch = schema();
        let mut rec = Record::new(1);
        rec.set("age", TypedValue::Int(99), &sch).unwrap();
        rec.set("name", TypedValue::Text("alice2".into()), &sch).unwrap();
        dao.save(rec);
        assert_eq!(dao.count(), 4);
        assert_eq!(dao.find_by_id(1).unwrap().get("age"), Some(&TypedValue::Int(99)));
    }

    #[test]
    fn test_empty_criteria_equals_find_all() {
        let dao = dao();
        let all = dao.find_all();
        let queried = dao.query_result(&Criteria::default()).unwrap();
        assert_eq!(all, queried);
    }

    #[test]
    fn test_query_result_filters() {
        let dao = dao();
        let criteria = Criteria {
            filters: vec![Filter::basic("age", BasicOperator::GreaterThanOrEqual, "30")],
            joins: vec![],
        };
        let result = dao.query_result(&criteria).unwrap();
        let ids: Vec<i64> = result.iter().map(Record::id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_query_result_page_sorting_and_paging() {
        let dao = dao();
        let criteria = PageableCriteria {
            criteria: Criteria::default(),
            page: 0,
            size: 3,
            sort: Some(SortSpec {
                ascending: vec!["age".into()],
                descending: vec!["name".into()],
            }),
        };
        let page = dao.query_result_page(&criteria).unwrap();
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages(), 2);
        // age ascending, name descending within equal ages: dave (20) before
        // bob (20), then alice (30).
        let names: Vec<&TypedValue> = page.items.iter().map(|r| r.get("name").unwrap()).collect();
        assert_eq!(
            names,
            vec![
                &TypedValue::Text("dave".into()),
                &TypedValue::Text("bob".into()),
                &TypedValue::Text("alice".into()),
            ]
        );

        let second = PageableCriteria { page: 1, ..criteria };
        let page = dao.query_result_page(&second).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].get("name"), Some(&TypedValue::Text("carol".into())));
    }

    #[test]
    fn test_find_page_unsorted_natural_order() {
        let dao = dao();
        let page = dao.find_page(&PageRequest::of(0, 2));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_elements, 4);
        let ids: Vec<i64> = page.items.iter().map(Record::id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
