use std::fmt::Display;
use std::str::FromStr;

/// Keys beginning with this sigil are operators rather than field paths.
pub const OPERATOR_SIGIL: char = '$';

/// Operators that combine whole sub-documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And, // $and
    Or,  // $or
}

/// Operators that test a single field's resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,              // $eq
    NotEqual,           // $ne
    GreaterThan,        // $gt
    GreaterThanOrEqual, // $gte
    LessThan,           // $lt
    LessThanOrEqual,    // $lte
    In,                 // $in
    Regex,              // $regex
    Options,            // $options
    Not,                // $not
}

/// Any keyword in the operator namespace.
///
/// `$and` and `$or` are recognized inside a field expression so that the shorthand check
/// treats them as operators, but dispatching them there is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Boolean(BooleanOperator),
    Comparison(ComparisonOperator),
}

impl BooleanOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            BooleanOperator::And => "$and",
            BooleanOperator::Or => "$or",
        }
    }
}

impl ComparisonOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "$eq",
            ComparisonOperator::NotEqual => "$ne",
            ComparisonOperator::GreaterThan => "$gt",
            ComparisonOperator::GreaterThanOrEqual => "$gte",
            ComparisonOperator::LessThan => "$lt",
            ComparisonOperator::LessThanOrEqual => "$lte",
            ComparisonOperator::In => "$in",
            ComparisonOperator::Regex => "$regex",
            ComparisonOperator::Options => "$options",
            ComparisonOperator::Not => "$not",
        }
    }
}

impl Operator {
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::Boolean(op) => op.keyword(),
            Operator::Comparison(op) => op.keyword(),
        }
    }

    /// True when `keyword` names any registered operator.
    pub fn is_recognized(keyword: &str) -> bool { keyword.parse::<Operator>().is_ok() }
}

/// Returned when a keyword is not a registered operator. Callers turn this into
/// [`crate::Error::UnsupportedOperator`] carrying the offending keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOperator;

impl FromStr for BooleanOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$and" => Ok(BooleanOperator::And),
            "$or" => Ok(BooleanOperator::Or),
            _ => Err(UnknownOperator),
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$eq" => Ok(ComparisonOperator::Equal),
            "$ne" => Ok(ComparisonOperator::NotEqual),
            "$gt" => Ok(ComparisonOperator::GreaterThan),
            "$gte" => Ok(ComparisonOperator::GreaterThanOrEqual),
            "$lt" => Ok(ComparisonOperator::LessThan),
            "$lte" => Ok(ComparisonOperator::LessThanOrEqual),
            "$in" => Ok(ComparisonOperator::In),
            "$regex" => Ok(ComparisonOperator::Regex),
            "$options" => Ok(ComparisonOperator::Options),
            "$not" => Ok(ComparisonOperator::Not),
            _ => Err(UnknownOperator),
        }
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ComparisonOperator>().map(Operator::Comparison).or_else(|_| s.parse::<BooleanOperator>().map(Operator::Boolean))
    }
}

impl Display for BooleanOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.keyword()) }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.keyword()) }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.keyword()) }
}
