//! Predicate module: composable boolean fragments over records.
//!
//! Handlers emit `Predicate` fragments; the planner AND-combines them into one
//! plan. A predicate is a pure closure over an immutable record: all coercion
//! and validation has already happened at build time, so evaluation cannot
//! fail.

use crate::record::Record;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Record) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Matches every record (the identity for AND).
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Matches no record (the identity for OR).
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn test(&self, record: &Record) -> bool {
        (self.0)(record)
    }

    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::new(move |r| self.test(r) && other.test(r))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::new(move |r| self.test(r) || other.test(r))
    }

    pub fn not(self) -> Predicate {
        Predicate::new(move |r| !self.test(r))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordSchemaBuilder;
    use crate::types::{FieldKind, TypedValue};

    fn record(age: i32) -> Record {
        let schema = RecordSchemaBuilder::new().field("age", FieldKind::Int).build();
        let mut rec = Record::new(1);
        rec.set("age", TypedValue::Int(age), &schema).unwrap();
        rec
    }

    fn age_over(n: i32) -> Predicate {
        Predicate::new(move |r| matches!(r.get("age"), Some(TypedValue::Int(a)) if *a > n))
    }

    #[test]
    fn test_always_and_never() {
        let rec = record(1);
        assert!(Predicate::always().test(&rec));
        assert!(!Predicate::never().test(&rec));
    }

    #[test]
    fn test_and_or_not_composition() {
        let rec = record(30);
        assert!(age_over(10).and(age_over(20)).test(&rec));
        assert!(!age_over(10).and(age_over(40)).test(&rec));
        assert!(age_over(40).or(age_over(10)).test(&rec));
        assert!(age_over(40).not().test(&rec));
    }

    #[test]
    fn test_identity_laws() {
        let rec = record(30);
        assert_eq!(Predicate::always().and(age_over(10)).test(&rec), age_over(10).test(&rec));
        assert_eq!(Predicate::never().or(age_over(10)).test(&rec), age_over(10).test(&rec));
    }
}
