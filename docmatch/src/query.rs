use crate::collation::ValueKind;
use crate::error::Error;
use crate::operand::OperandEvaluator;
use crate::options::MatchOptions;
use crate::selection::filter::FilterIterator;
use crate::selection::Evaluator;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::sync::Arc;

/// A query document together with the settings used to evaluate it.
///
/// ```
/// use docmatch::Query;
/// use serde_json::json;
///
/// let query = Query::new(json!({ "age": { "$gte": 18 }, "country": { "$in": ["NL", "BE"] } })).unwrap();
/// assert!(query.test(&json!({ "age": 30, "country": "NL" })).unwrap());
/// assert!(!query.test(&json!({ "age": 16, "country": "NL" })).unwrap());
/// ```
#[derive(Clone, Deserialize)]
#[serde(try_from = "Value")]
pub struct Query {
    document: Map<String, Value>,
    options: MatchOptions,
    operand_evaluator: Option<Arc<dyn OperandEvaluator>>,
}

impl Query {
    /// Create a query from a document. The document must be an object.
    pub fn new(document: Value) -> Result<Self, Error> {
        match document {
            Value::Object(document) => Ok(Self { document, options: MatchOptions::default(), operand_evaluator: None }),
            other => Err(Error::InvalidDocument(ValueKind::of(&other))),
        }
    }

    pub fn document(&self) -> &Map<String, Value> { &self.document }

    pub fn options(&self) -> MatchOptions { self.options }

    pub fn is_strict(&self) -> bool { self.options.strict }

    pub fn undefined_equals_null(&self) -> bool { self.options.undefined_equals_null }

    pub fn set_options(&mut self, options: MatchOptions) -> &mut Self {
        tracing::debug!(?options, "set_options");
        self.options = options;
        self
    }

    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        tracing::debug!(strict, "set_strict");
        self.options.strict = strict;
        self
    }

    pub fn set_undefined_equals_null(&mut self, undefined_equals_null: bool) -> &mut Self {
        tracing::debug!(undefined_equals_null, "set_undefined_equals_null");
        self.options.undefined_equals_null = undefined_equals_null;
        self
    }

    /// Install a hook that rewrites every operand before it is compared.
    pub fn set_operand_evaluator(&mut self, operand_evaluator: impl OperandEvaluator + 'static) -> &mut Self {
        tracing::debug!("set_operand_evaluator");
        self.operand_evaluator = Some(Arc::new(operand_evaluator));
        self
    }

    pub fn clear_operand_evaluator(&mut self) -> &mut Self {
        self.operand_evaluator = None;
        self
    }

    /// Does `data` satisfy this query?
    ///
    /// `data` must be an object. Otherwise this is an error in strict mode and `false` when lenient.
    pub fn test(&self, data: &Value) -> Result<bool, Error> {
        let evaluator = Evaluator::new(self.options, self.operand_evaluator.as_deref());
        if !data.is_object() {
            return evaluator.lenient(Error::InvalidContext(ValueKind::of(data)));
        }

        let result = evaluator.evaluate_fields(&self.document, data)?;
        tracing::debug!(result, "test");
        Ok(result)
    }

    /// Lazily test each data context from `iter`.
    pub fn filter<I, R>(&self, iter: I) -> FilterIterator<'_, I::IntoIter>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<Value>,
    {
        FilterIterator::new(iter.into_iter(), self)
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("document", &self.document)
            .field("options", &self.options)
            .field("operand_evaluator", &self.operand_evaluator.is_some())
            .finish()
    }
}
