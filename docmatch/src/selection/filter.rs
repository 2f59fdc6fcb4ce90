//! Evaluate query documents against data contexts, and filter a stream of contexts through a query.

use super::Evaluator;
use crate::ast::{BooleanOperator, OPERATOR_SIGIL};
use crate::collation::ValueKind;
use crate::error::Error;
use crate::path::resolve;
use crate::query::Query;
use serde_json::{Map, Value};
use std::borrow::Borrow;

static NULL: Value = Value::Null;

impl Evaluator<'_> {
    /// Evaluate a sub-document. Anything other than an object is malformed.
    pub(crate) fn evaluate_document(&self, document: &Value, context: &Value) -> Result<bool, Error> {
        match document {
            Value::Object(document) => self.evaluate_fields(document, context),
            other => self.lenient(Error::InvalidDocument(ValueKind::of(other))),
        }
    }

    /// An empty document matches everything. Several keys form an implicit `$and` of one
    /// single-key document per key, in document order.
    pub(crate) fn evaluate_fields(&self, document: &Map<String, Value>, context: &Value) -> Result<bool, Error> {
        let mut result = true;
        for (key, value) in document {
            result &= self.evaluate_entry(key, value, context)?;
        }
        Ok(result)
    }

    fn evaluate_entry(&self, key: &str, value: &Value, context: &Value) -> Result<bool, Error> {
        if key.starts_with(OPERATOR_SIGIL) {
            let operator = key.parse::<BooleanOperator>().map_err(|_| Error::UnsupportedOperator(key.to_string()))?;
            return self.evaluate_boolean(operator, value, context);
        }
        if key.is_empty() {
            return Err(Error::EmptyFieldName);
        }

        let mut field = resolve(key, context);
        if field.is_none() && self.options.undefined_equals_null {
            field = Some(&NULL);
        }
        self.evaluate_expression(key, field, value, context)
    }

    /// Every branch is evaluated, even once the outcome is known, so the operand hook runs
    /// for all of them.
    fn evaluate_boolean(&self, operator: BooleanOperator, operand: &Value, context: &Value) -> Result<bool, Error> {
        let Value::Array(branches) = operand else {
            return self.lenient(Error::InvalidOperand { operator: operator.keyword(), expected: "array", got: ValueKind::of(operand) });
        };

        let results = branches.iter().map(|branch| self.evaluate_document(branch, context)).collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(%operator, ?results, "boolean");
        Ok(match operator {
            BooleanOperator::And => results.iter().all(|r| *r),
            BooleanOperator::Or => results.iter().any(|r| *r),
        })
    }
}

#[derive(Debug)]
pub enum FilterResult<R> {
    Pass(R),
    Skip(R),
    Error(R, Error),
}

/// Runs every data context from `iter` through a query.
pub struct FilterIterator<'q, I> {
    iter: I,
    query: &'q Query,
}

impl<'q, I, R> FilterIterator<'q, I>
where
    I: Iterator<Item = R>,
    R: Borrow<Value>,
{
    pub fn new(iter: I, query: &'q Query) -> Self { Self { iter, query } }
}

impl<I, R> Iterator for FilterIterator<'_, I>
where
    I: Iterator<Item = R>,
    R: Borrow<Value>,
{
    type Item = FilterResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|item| match self.query.test(item.borrow()) {
            Ok(true) => FilterResult::Pass(item),
            Ok(false) => FilterResult::Skip(item),
            Err(e) => FilterResult::Error(item, e),
        })
    }
}
