//! Evaluation of query documents against a data context.

pub mod expression;
pub mod filter;

use crate::error::Error;
use crate::operand::OperandEvaluator;
use crate::options::MatchOptions;
use serde_json::Value;
use std::borrow::Cow;

/// Borrowed view of a query's settings for the duration of one `test` call.
#[derive(Clone, Copy)]
pub(crate) struct Evaluator<'a> {
    options: MatchOptions,
    operand_evaluator: Option<&'a dyn OperandEvaluator>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(options: MatchOptions, operand_evaluator: Option<&'a dyn OperandEvaluator>) -> Self {
        Self { options, operand_evaluator }
    }

    /// Raise `err` in strict mode, otherwise evaluate to `false`.
    pub(crate) fn lenient(&self, err: Error) -> Result<bool, Error> {
        if self.options.strict {
            Err(err)
        } else {
            tracing::debug!("treating as no match: {}", err);
            Ok(false)
        }
    }

    /// Run `operand` through the configured hook, if any.
    fn effective_operand<'v>(&self, operand: &'v Value, context: &Value) -> Result<Cow<'v, Value>, Error> {
        match self.operand_evaluator {
            Some(hook) => Ok(Cow::Owned(hook.evaluate(operand, context)?)),
            None => Ok(Cow::Borrowed(operand)),
        }
    }
}
