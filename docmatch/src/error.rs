use crate::collation::ValueKind;
use thiserror::Error;

/// Broad classification of an [`Error`], used by callers that only care about who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The query document itself is malformed
    Authoring,
    /// Strict mode rejected a comparison between values of different kinds
    TypeMismatch,
    /// The data context passed to `test` is not an object
    InputShape,
    /// The operand evaluator hook failed
    Operand,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Query document must be an object, got {0}")]
    InvalidDocument(ValueKind),
    #[error("Empty field name in query document")]
    EmptyFieldName,
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    #[error("Operator {0} is not valid inside a field expression")]
    MisplacedOperator(&'static str),
    #[error("Invalid operand for {operator}: expected {expected}, got {got}")]
    InvalidOperand { operator: &'static str, expected: &'static str, got: ValueKind },
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("Unsupported regular expression flag: {0:?}")]
    InvalidRegexFlag(char),
    #[error("Type mismatch in {operator} at {path}: {left} vs {right}")]
    TypeMismatch { operator: &'static str, path: String, left: ValueKind, right: ValueKind },
    #[error("Data context must be an object, got {0}")]
    InvalidContext(ValueKind),
    #[error("Operand evaluation failed: {0}")]
    Operand(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDocument(_)
            | Error::EmptyFieldName
            | Error::UnsupportedOperator(_)
            | Error::MisplacedOperator(_)
            | Error::InvalidOperand { .. }
            | Error::InvalidRegex(_)
            | Error::InvalidRegexFlag(_)
            | Error::Json(_) => ErrorKind::Authoring,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::InvalidContext(_) => ErrorKind::InputShape,
            Error::Operand(_) => ErrorKind::Operand,
        }
    }
}
