//! Minimal end-to-end usage: schema, store, criteria from JSON, query.

use queryspec::*;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(
        RecordSchemaBuilder::new()
            .field("name", FieldKind::Text)
            .field("age", FieldKind::Int)
            .field("createdAt", FieldKind::Timestamp)
            .build(),
    );
    let registry = Arc::new(HandlerRegistry::with_defaults());
    let planner = QueryPlanner::new(Arc::clone(&schema), registry);
    let mut dao = Dao::new(MemoryStore::new(), planner);

    for (id, name, age, created) in [
        (1, "alice", 30, "2025-08-15T12:00:00Z"),
        (2, "bob", 20, "2025-07-01T08:30:00Z"),
        (3, "carol", 40, "2025-08-20T09:00:00Z"),
    ] {
        let mut rec = Record::new(id);
        rec.set("name", TypedValue::Text(name.into()), &schema)?;
        rec.set("age", TypedValue::Int(age), &schema)?;
        rec.set("createdAt", TypedValue::Timestamp(created.parse()?), &schema)?;
        dao.save(rec);
    }

    // A criteria payload as it would arrive from the API layer.
    let criteria: PageableCriteria = serde_json::from_str(
        r#"{
            "filters": [
                {"type": "BASIC", "field": "age", "operator": "GREATER_THAN_OR_EQUAL", "value": "30"},
                {"type": "BETWEEN", "field": "createdAt", "operator": "BETWEEN",
                 "startDateTime": "2025-08-01T00:00:00Z", "endDateTime": "2025-08-31T23:59:59Z"}
            ],
            "page": 0,
            "size": 10,
            "sort": {"ascending": ["name"], "descending": []}
        }"#,
    )?;

    let page = dao.query_result_page(&criteria)?;
    println!("matched {} of {} records:", page.items.len(), page.total_elements);
    for rec in &page.items {
        println!("  #{} {:?} {:?}", rec.id(), rec.get("name"), rec.get("age"));
    }
    Ok(())
}
