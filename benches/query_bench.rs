use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use queryspec::*;
use std::sync::Arc;

fn schema() -> RecordSchema {
    RecordSchemaBuilder::new()
        .field("age", FieldKind::Int)
        .field("status", FieldKind::Text)
        .field("createdAt", FieldKind::Timestamp)
        .build()
}

fn criteria() -> Criteria {
    let start = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 8, 31, 23, 59, 59).unwrap();
    Criteria {
        filters: vec![
            Filter::basic("age", BasicOperator::GreaterThanOrEqual, "21"),
            Filter::contains("status", vec!["NEW".into(), "OPEN".into()]),
            Filter::between("createdAt", start, end),
        ],
        joins: vec![],
    }
}

fn populate(dao: &mut Dao<MemoryStore>, schema: &RecordSchema, n: i64) {
    let statuses = ["NEW", "OPEN", "CLOSED"];
    for id in 0..n {
        let mut rec = Record::new(id);
        rec.set("age", TypedValue::Int((id % 60) as i32), schema).unwrap();
        rec.set(
            "status",
            TypedValue::Text(statuses[(id % 3) as usize].into()),
            schema,
        )
        .unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 8, 1 + (id % 28) as u32, 0, 0, 0).unwrap();
        rec.set("createdAt", TypedValue::Timestamp(ts), schema).unwrap();
        dao.save(rec);
    }
}

fn bench_build_predicate(c: &mut Criterion) {
    let schema = Arc::new(schema());
    let planner = QueryPlanner::new(schema, Arc::new(HandlerRegistry::with_defaults()));
    let criteria = criteria();
    c.bench_function("build_predicate", |b| {
        b.iter(|| planner.build_predicate(black_box(&criteria)).unwrap())
    });
}

fn bench_query_result(c: &mut Criterion) {
    let schema = Arc::new(schema());
    let planner = QueryPlanner::new(Arc::clone(&schema), Arc::new(HandlerRegistry::with_defaults()));
    let mut dao = Dao::new(MemoryStore::new(), planner);
    populate(&mut dao, &schema, 10_000);
    let criteria = criteria();
    c.bench_function("query_result_10k", |b| {
        b.iter(|| dao.query_result(black_box(&criteria)).unwrap())
    });
}

criterion_group!(benches, bench_build_predicate, bench_query_result);
criterion_main!(benches);
