//! Evaluate MongoDB-style boolean query documents against JSON data contexts.
//!
//! ```
//! use docmatch::Query;
//! use serde_json::json;
//!
//! let query = Query::new(json!({
//!     "now.isoTime": { "$gt": "10:00", "$lt": "18:00" },
//!     "now.isoDate": { "$not": { "$in": ["2020-01-01"] } }
//! }))
//! .unwrap();
//!
//! assert!(query.test(&json!({ "now": { "isoTime": "13:00", "isoDate": "2020-05-21" } })).unwrap());
//! ```
//!
//! Evaluation is lenient by default: type mismatches and malformed operands evaluate to
//! `false`. [`Query::set_strict`] turns those into errors.

pub mod ast;
pub mod collation;
mod conversion;
pub mod error;
pub mod operand;
pub mod options;
pub mod path;
mod query;
pub mod selection;

pub use error::{Error, ErrorKind};
pub use operand::OperandEvaluator;
pub use options::MatchOptions;
pub use path::{resolve, FieldPath};
pub use query::Query;
pub use selection::filter::{FilterIterator, FilterResult};
