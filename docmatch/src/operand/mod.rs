//! Operand evaluators rewrite an operator's operand before it is compared, which is how
//! computed operands (the current time, concatenated strings, references to other
//! variables) are supported without the evaluator knowing about any of them.

mod time;

pub use time::{time_context, Clock, FixedClock, NowOperand, SystemClock};

use crate::collation::{self, ValueKind};
use crate::error::Error;
use crate::path;
use serde_json::Value;

pub const VAR: &str = "$var";
pub const CONCAT: &str = "$concat";
pub const NOW: &str = "$now";

/// Hook invoked once per `{operator: operand}` pair with the raw operand and the data
/// context. Its return value is compared in place of the operand.
pub trait OperandEvaluator: Send + Sync {
    fn evaluate(&self, operand: &Value, context: &Value) -> Result<Value, Error>;
}

impl<F> OperandEvaluator for F
where
    F: Fn(&Value, &Value) -> Result<Value, Error> + Send + Sync,
{
    fn evaluate(&self, operand: &Value, context: &Value) -> Result<Value, Error> { self(operand, context) }
}

/// The single `(keyword, argument)` pair of a one-key object, if `operand` is one.
fn single_entry(operand: &Value) -> Option<(&str, &Value)> {
    match operand {
        Value::Object(map) if map.len() == 1 => map.iter().next().map(|(k, v)| (k.as_str(), v)),
        _ => None,
    }
}

/// `{"$var": "path"}` becomes the value at `path` in the data context, or `null` when the
/// path does not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableOperand;

impl VariableOperand {
    fn lookup(argument: &Value, context: &Value) -> Result<Value, Error> {
        match argument {
            Value::String(name) => Ok(path::resolve(name, context).cloned().unwrap_or(Value::Null)),
            other => Err(Error::InvalidOperand { operator: VAR, expected: "string", got: ValueKind::of(other) }),
        }
    }
}

impl OperandEvaluator for VariableOperand {
    fn evaluate(&self, operand: &Value, context: &Value) -> Result<Value, Error> {
        match single_entry(operand) {
            Some((VAR, argument)) => Self::lookup(argument, context),
            _ => Ok(operand.clone()),
        }
    }
}

/// `{"$concat": [a, b, ...]}` becomes the string formed by joining each part. `null` parts
/// contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatOperand;

impl ConcatOperand {
    fn join(argument: &Value, context: &Value, parts: &dyn OperandEvaluator) -> Result<Value, Error> {
        let Value::Array(items) = argument else {
            return Err(Error::InvalidOperand { operator: CONCAT, expected: "array", got: ValueKind::of(argument) });
        };
        let mut joined = String::new();
        for item in items {
            match parts.evaluate(item, context)? {
                Value::Null => {}
                part => joined.push_str(&collation::string_form(Some(&part)).unwrap_or_default()),
            }
        }
        Ok(Value::String(joined))
    }
}

impl OperandEvaluator for ConcatOperand {
    fn evaluate(&self, operand: &Value, context: &Value) -> Result<Value, Error> {
        match single_entry(operand) {
            Some((CONCAT, argument)) => Self::join(argument, context, &|part: &Value, _: &Value| -> Result<Value, Error> { Ok(part.clone()) }),
            _ => Ok(operand.clone()),
        }
    }
}

/// `$var`, `$concat` and `$now` together. Operands are rewritten recursively: array
/// elements and `$concat` parts may themselves be computed operands. Anything else is
/// returned unchanged.
pub struct StandardOperands<C = SystemClock> {
    now: NowOperand<C>,
}

impl StandardOperands<SystemClock> {
    pub fn new() -> Self { Self { now: NowOperand::new(SystemClock) } }
}

impl Default for StandardOperands<SystemClock> {
    fn default() -> Self { Self::new() }
}

impl<C: Clock> StandardOperands<C> {
    pub fn with_clock(clock: C) -> Self { Self { now: NowOperand::new(clock) } }
}

impl<C: Clock> OperandEvaluator for StandardOperands<C> {
    fn evaluate(&self, operand: &Value, context: &Value) -> Result<Value, Error> {
        if let Value::Array(items) = operand {
            return items.iter().map(|item| self.evaluate(item, context)).collect::<Result<Vec<_>, _>>().map(Value::Array);
        }
        match single_entry(operand) {
            Some((VAR, argument)) => VariableOperand::lookup(argument, context),
            Some((CONCAT, argument)) => ConcatOperand::join(argument, context, self),
            Some((NOW, argument)) => self.now.component(argument),
            _ => Ok(operand.clone()),
        }
    }
}
