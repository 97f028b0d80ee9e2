//! Structural path queries over untyped JSON identity documents.
//!
//! Queries are RFC 9535 JSONPath expressions (`$.identity.phones[*]`). A
//! compiled [`PathExpression`] is evaluated in one of two modes: values mode
//! yields the matched nodes, paths mode yields their normalized paths
//! (`$['identity']['phones'][1]`). The two modes are separate queries over
//! the same document and always agree on order.

use crate::error::ConfigurationError;
use serde_json::Value;
use serde_json_path::JsonPath;
use std::fmt;

// ─── PathExpression ─────────────────────────────────────────────────────────

/// A compiled path query together with its source text.
#[derive(Debug)]
pub struct PathExpression {
    source: String,
    compiled: JsonPath,
}

impl PathExpression {
    /// Compiles `query`.
    ///
    /// Fails with [`ConfigurationError::InvalidPathQuery`] if it is not a
    /// well-formed JSONPath expression.
    pub fn parse(query: &str) -> Result<Self, ConfigurationError> {
        let compiled =
            JsonPath::parse(query).map_err(|e| ConfigurationError::InvalidPathQuery {
                query: query.to_string(),
                message: e.to_string(),
            })?;
        Ok(PathExpression {
            source: query.to_string(),
            compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Values mode: every node the query selects, in evaluation order.
    ///
    /// A missing field resolves to an empty vec, never an error.
    pub fn resolve_values<'a>(&self, document: &'a Value) -> Vec<&'a Value> {
        self.compiled.query(document).all()
    }

    /// Paths mode: the normalized path of every selected node, in the same
    /// order as [`resolve_values`](Self::resolve_values).
    pub fn resolve_paths(&self, document: &Value) -> Vec<String> {
        self.compiled
            .query_located(document)
            .locations()
            .map(|location| location.to_string())
            .collect()
    }

    /// Runs both modes and pairs them by index.
    pub fn resolve<'a>(&self, document: &'a Value) -> MatchResult<'a> {
        let values = self.resolve_values(document);
        let paths = self.resolve_paths(document);
        MatchResult {
            matches: paths
                .into_iter()
                .zip(values)
                .map(|(path, value)| Match { path, value })
                .collect(),
        }
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ─── MatchResult ────────────────────────────────────────────────────────────

/// One selected node and the concrete path it was found at.
#[derive(Clone, Debug, PartialEq)]
pub struct Match<'a> {
    /// Raw normalized path, e.g. `$['phones'][1]`.
    pub path: String,
    pub value: &'a Value,
}

impl Match<'_> {
    /// Slash form of [`path`](Self::path), e.g. `phones/1`.
    pub fn location(&self) -> String {
        normalize_location(&self.path)
    }
}

/// Ordered matches of one query against one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchResult<'a> {
    matches: Vec<Match<'a>>,
}

impl<'a> MatchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match<'a>> {
        self.matches.iter()
    }

    pub fn first(&self) -> Option<&Match<'a>> {
        self.matches.first()
    }
}

impl<'a> IntoIterator for MatchResult<'a> {
    type Item = Match<'a>;
    type IntoIter = std::vec::IntoIter<Match<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Converts a normalized path into the slash form used in error locations.
///
/// The root marker and quotes are dropped, the outer brackets trimmed and
/// every `][` boundary becomes `/`: `$['a']['b'][2]` becomes `a/b/2`. The
/// root path `$` becomes the empty string.
///
/// Lossy for keys containing quotes: every `'` is dropped but escape
/// backslashes are kept, so `$['O\'Brien']` becomes `O\Brien`.
pub fn normalize_location(raw: &str) -> String {
    let unrooted = raw.strip_prefix('$').unwrap_or(raw);
    let unquoted: String = unrooted.chars().filter(|c| *c != '\'').collect();
    let inner = unquoted.strip_prefix('[').unwrap_or(&unquoted);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner.replace("][", "/")
}

/// Text a pattern is matched against.
///
/// Scalars use their natural representation; arrays and objects have none
/// and yield `None`. Numbers keep their source digits, so integers beyond
/// 64 bits are matched exactly as written.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
