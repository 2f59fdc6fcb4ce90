//! Field expressions: the value attached to a field path in a query document.
//!
//! A bare scalar, array or null is shorthand for `{"$eq": value}`. An object is an explicit
//! expression only when its first key is a recognized operator; otherwise the whole object is
//! itself the `$eq` operand.

use super::Evaluator;
use crate::ast::{ComparisonOperator, Operator};
use crate::collation::{self, Coercion, ValueKind};
use crate::error::Error;
use regex::RegexBuilder;
use serde_json::Value;
use std::cmp::Ordering;

impl Evaluator<'_> {
    /// Evaluate `expression` against the resolved `field` (`None` when the path did not resolve).
    /// Every operator is evaluated, even after one fails, so the operand hook sees all of them.
    pub(crate) fn evaluate_expression(&self, path: &str, field: Option<&Value>, expression: &Value, context: &Value) -> Result<bool, Error> {
        let pairs = match expression {
            Value::Object(pairs) if pairs.keys().next().is_some_and(|key| Operator::is_recognized(key)) => pairs,
            shorthand => {
                let operand = self.effective_operand(shorthand, context)?;
                return self.evaluate_comparison(ComparisonOperator::Equal, path, field, &operand, None, context);
            }
        };

        let mut operands = Vec::with_capacity(pairs.len());
        for (keyword, operand) in pairs {
            let operator = keyword.parse::<Operator>().map_err(|_| Error::UnsupportedOperator(keyword.clone()))?;
            operands.push((operator, self.effective_operand(operand, context)?));
        }
        // $regex reads its flags from the effective $options operand
        let flags = operands
            .iter()
            .find(|(operator, _)| *operator == Operator::Comparison(ComparisonOperator::Options))
            .map(|(_, operand)| &**operand);

        let mut result = true;
        for (operator, operand) in &operands {
            let matched = match *operator {
                Operator::Boolean(op) => return Err(Error::MisplacedOperator(op.keyword())),
                Operator::Comparison(op) => self.evaluate_comparison(op, path, field, operand, flags, context)?,
            };
            result &= matched;
        }
        Ok(result)
    }

    fn evaluate_comparison(
        &self,
        operator: ComparisonOperator,
        path: &str,
        field: Option<&Value>,
        operand: &Value,
        flags: Option<&Value>,
        context: &Value,
    ) -> Result<bool, Error> {
        tracing::trace!(%operator, path, field = ?field, %operand, "evaluate");
        let coercion = if self.options.strict { Coercion::None } else { Coercion::NumberToString };

        match operator {
            ComparisonOperator::Equal => {
                let items = match field {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                };
                if items.is_none() && !operand.is_null() {
                    self.check_kinds(operator, path, field, operand)?;
                }
                Ok(collation::equals(field, Some(operand), coercion) || items.is_some_and(|items| collation::contains(items, Some(operand), coercion)))
            }
            ComparisonOperator::NotEqual => Ok(!collation::equals(field, Some(operand), coercion)),
            ComparisonOperator::GreaterThan => self.evaluate_ordering(operator, path, field, operand, |o| o == Ordering::Greater),
            ComparisonOperator::GreaterThanOrEqual => self.evaluate_ordering(operator, path, field, operand, |o| o != Ordering::Less),
            ComparisonOperator::LessThan => self.evaluate_ordering(operator, path, field, operand, |o| o == Ordering::Less),
            ComparisonOperator::LessThanOrEqual => self.evaluate_ordering(operator, path, field, operand, |o| o != Ordering::Greater),
            ComparisonOperator::In => match operand {
                Value::Array(items) => Ok(collation::contains(items, field, coercion)),
                other => self.lenient(Error::InvalidOperand { operator: operator.keyword(), expected: "array", got: ValueKind::of(other) }),
            },
            ComparisonOperator::Regex => self.evaluate_regex(field, operand, flags),
            // consumed by $regex
            ComparisonOperator::Options => Ok(true),
            ComparisonOperator::Not => Ok(!self.evaluate_expression(path, field, operand, context)?),
        }
    }

    fn evaluate_ordering(
        &self,
        operator: ComparisonOperator,
        path: &str,
        field: Option<&Value>,
        operand: &Value,
        accept: impl Fn(Ordering) -> bool,
    ) -> Result<bool, Error> {
        self.check_kinds(operator, path, field, operand)?;
        Ok(field.and_then(|field| collation::compare(field, operand)).is_some_and(accept))
    }

    /// In strict mode, a present non-null field must have the same kind as the operand.
    fn check_kinds(&self, operator: ComparisonOperator, path: &str, field: Option<&Value>, operand: &Value) -> Result<(), Error> {
        let (left, right) = (ValueKind::of_field(field), ValueKind::of(operand));
        if self.options.strict && !left.is_nullish() && left != right {
            return Err(Error::TypeMismatch { operator: operator.keyword(), path: path.to_string(), left, right });
        }
        Ok(())
    }

    fn evaluate_regex(&self, field: Option<&Value>, operand: &Value, flags: Option<&Value>) -> Result<bool, Error> {
        let Value::String(pattern) = operand else {
            return self.lenient(Error::InvalidOperand { operator: "$regex", expected: "string", got: ValueKind::of(operand) });
        };
        let flags = match flags {
            None => "",
            Some(Value::String(flags)) => flags.as_str(),
            Some(other) => {
                return self.lenient(Error::InvalidOperand { operator: "$options", expected: "string", got: ValueKind::of(other) });
            }
        };

        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                // global, sticky and unicode do not change whether a match exists
                'g' | 'y' | 'u' => &mut builder,
                other => return Err(Error::InvalidRegexFlag(other)),
            };
        }
        let regex = builder.build()?;
        Ok(collation::string_form(field).is_some_and(|haystack| regex.is_match(&haystack)))
    }
}
