#![allow(dead_code)]

use courier::{BoxError, Message};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Message Types
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct TestQuery {
    pub id: i64,
    pub resp: String,
}

impl Message for TestQuery {}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserCreated {
    pub id: i64,
}

impl Message for UserCreated {}

#[derive(Debug, Default)]
pub struct Unhandled;

impl Message for Unhandled {}

// ============================================================================
// Helpers
// ============================================================================

/// A shared call counter that can be moved into several closures.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn add(&self, n: usize) {
        self.0.fetch_add(n, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A handler closure that writes `resp` into the query.
pub fn answer(resp: &'static str) -> impl Fn(&mut TestQuery) -> Result<(), BoxError> {
    move |query: &mut TestQuery| {
        query.resp = resp.to_string();
        Ok(())
    }
}
