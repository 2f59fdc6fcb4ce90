use crate::error::Error;
use crate::query::Query;
use serde_json::Value;
use std::convert::TryFrom;
use std::str::FromStr;

impl TryFrom<Value> for Query {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> { Query::new(value) }
}
impl<'a> TryFrom<&'a str> for Query {
    type Error = Error;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { Query::new(serde_json::from_str(value)?) }
}
impl TryFrom<String> for Query {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> { Query::try_from(value.as_str()) }
}
impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Query::try_from(s) }
}
