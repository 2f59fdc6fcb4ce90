use serde::{Deserialize, Serialize};

/// Evaluation settings held by a [`crate::Query`].
///
/// Deserializable so that settings can travel alongside a query document, e.g.
/// `{"strict": true, "undefinedEqualsNull": false}`. Absent keys take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchOptions {
    /// Raise on type mismatches and malformed operands instead of evaluating to `false`
    pub strict: bool,
    /// Treat a path that does not resolve as `null`
    pub undefined_equals_null: bool,
}

impl MatchOptions {
    pub fn strict() -> Self { Self { strict: true, ..Self::default() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MatchOptions::default();
        assert!(!options.strict);
        assert!(!options.undefined_equals_null);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: MatchOptions = serde_json::from_str(r#"{"undefinedEqualsNull": true}"#).unwrap();
        assert_eq!(options, MatchOptions { strict: false, undefined_equals_null: true });

        let options: MatchOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MatchOptions::default());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(MatchOptions::strict()).unwrap();
        assert_eq!(json, serde_json::json!({ "strict": true, "undefinedEqualsNull": false }));
    }
}
