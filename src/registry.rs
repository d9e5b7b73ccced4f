//! Registry module: maps filter kinds to their handlers.
//!
//! The registry is populated once during process startup and shared read-only
//! (behind an `Arc`) by every in-flight query build afterwards. A missing
//! handler is a first-class error, never a null the caller must remember to
//! check.

use crate::criteria::FilterKind;
use crate::handler::{
    BasicFilterHandler, BetweenFilterHandler, ContainsFilterHandler, DateTimeFilterHandler,
    FilterHandler,
};
use crate::QueryError;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<FilterKind, Arc<dyn FilterHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in handler registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BasicFilterHandler);
        registry.register(BetweenFilterHandler);
        registry.register(ContainsFilterHandler);
        registry.register(DateTimeFilterHandler);
        registry
    }

    /// Registers a handler under its own kind. Re-registering a kind replaces
    /// the previous handler (last one wins).
    pub fn register<H>(&mut self, handler: H)
    where
        H: FilterHandler + 'static,
    {
        let kind = handler.kind();
        log::debug!("registering filter handler for kind {kind}");
        self.handlers.insert(kind, Arc::new(handler));
    }

    pub fn lookup(&self, kind: FilterKind) -> Result<&Arc<dyn FilterHandler>, QueryError> {
        self.handlers
            .get(&kind)
            .ok_or_else(|| QueryError::UnregisteredFilterKind(kind.to_string()))
    }
}
