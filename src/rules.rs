//! Compiled validation rules.
//!
//! A [`RuleSet`] is built once from configuration and is read-only
//! afterwards. Loading is all-or-nothing: one malformed query or pattern
//! rejects the whole set.

use crate::config::ValidatorConfig;
use crate::error::ConfigurationError;
use crate::path::PathExpression;
use regex::Regex;
use std::collections::BTreeMap;

/// A regex that must match a value in full.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    /// Compiles `source` for whole-value matching.
    ///
    /// The source is compiled on its own first so that the anchoring group
    /// cannot turn an unbalanced pattern into a valid one.
    pub fn compile(query: &str, source: &str) -> Result<Self, ConfigurationError> {
        let invalid = |e: regex::Error| ConfigurationError::InvalidPattern {
            query: query.to_string(),
            pattern: source.to_string(),
            message: e.to_string(),
        };
        Regex::new(source).map_err(invalid)?;
        let anchored = Regex::new(&format!(r"\A(?:{})\z", source)).map_err(invalid)?;
        Ok(Pattern {
            source: source.to_string(),
            anchored,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

/// A path query and the pattern every value it selects must match.
#[derive(Debug)]
pub struct Rule {
    path: PathExpression,
    pattern: Pattern,
}

impl Rule {
    pub fn compile(query: &str, pattern: &str) -> Result<Self, ConfigurationError> {
        Ok(Rule {
            path: PathExpression::parse(query)?,
            pattern: Pattern::compile(query, pattern)?,
        })
    }

    pub fn path(&self) -> &PathExpression {
        &self.path
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// The configured attribute rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles every `query -> pattern` entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] in key order; no partial set
    /// is ever produced.
    pub fn load(entries: &BTreeMap<String, String>) -> Result<Self, ConfigurationError> {
        let rules = entries
            .iter()
            .map(|(query, pattern)| Rule::compile(query, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(rules = rules.len(), "loaded attribute validation rules");
        Ok(RuleSet { rules })
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigurationError> {
        Self::load(&config.validation)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
