//! Common utilities for docmatch integration tests

use docmatch::{Error, OperandEvaluator, Query};
use serde_json::Value;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt().with_max_level(Level::from_str(&level).unwrap()).with_test_writer().init();
    } else {
        tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init();
    }
}

pub fn query(document: Value) -> Query { Query::new(document).expect("query document must be an object") }

pub fn strict(document: Value) -> Query {
    let mut query = query(document);
    query.set_strict(true);
    query
}

/// Operand evaluator that records every operand it sees and returns it unchanged.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    pub fn seen(&self) -> Vec<Value> { self.seen.lock().unwrap().clone() }
}

impl OperandEvaluator for Recorder {
    fn evaluate(&self, operand: &Value, _context: &Value) -> Result<Value, Error> {
        self.seen.lock().unwrap().push(operand.clone());
        Ok(operand.clone())
    }
}
