//! Field paths address a location inside a data context: `.` separates object members,
//! a trailing `[n]` indexes into an array (`a.b[2].c`), and `\.` is a literal dot.

use serde_json::Value;
use std::fmt::Display;

const ESCAPE: char = '\\';
const SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Member(String),
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    steps: Vec<PathStep>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let mut steps = Vec::new();
        for segment in split_segments(path) {
            push_segment(&mut steps, segment);
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] { &self.steps }

    /// Walk `context` along this path. `None` means the path does not resolve, which is
    /// distinct from `Some(&Value::Null)`.
    pub fn resolve<'a>(&self, context: &'a Value) -> Option<&'a Value> {
        let mut current = context;
        for step in &self.steps {
            current = match (current, step) {
                (Value::Null, _) => return None,
                (Value::Object(map), PathStep::Member(name)) => map.get(name)?,
                (Value::Array(items), PathStep::Index(index)) => items.get(*index)?,
                // `arr.1` addresses the same element as `arr[1]`
                (Value::Array(items), PathStep::Member(name)) => items.get(name.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Member(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&name.replace(SEPARATOR, "\\."))?;
                }
                PathStep::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Resolve `path` against `context`. Exposed so operand evaluators can look up variables
/// the same way field paths are resolved.
pub fn resolve<'a>(path: &str, context: &'a Value) -> Option<&'a Value> {
    let resolved = FieldPath::parse(path).resolve(context);
    tracing::trace!(path, found = resolved.is_some(), "resolve");
    resolved
}

/// Split on unescaped separators, unescaping `\.` in the process.
fn split_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE if chars.peek() == Some(&SEPARATOR) => {
                current.push(SEPARATOR);
                chars.next();
            }
            SEPARATOR => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

/// Peel trailing `[n]` suffixes off a segment. If any suffix is not a plain index the whole
/// segment is kept as a member name.
fn push_segment(steps: &mut Vec<PathStep>, segment: String) {
    let mut name = segment.as_str();
    let mut indexes = Vec::new();
    while let Some(stripped) = name.strip_suffix(']') {
        let Some(open) = stripped.rfind('[') else { break };
        match stripped[open + 1..].parse::<usize>() {
            Ok(index) if !stripped[open + 1..].starts_with('+') => {
                indexes.push(index);
                name = &stripped[..open];
            }
            _ => {
                steps.push(PathStep::Member(segment));
                return;
            }
        }
    }

    // `[0]` on its own indexes the current value directly
    if !name.is_empty() || indexes.is_empty() {
        steps.push(PathStep::Member(name.to_string()));
    }
    steps.extend(indexes.into_iter().rev().map(PathStep::Index));
}
