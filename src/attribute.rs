//! Evaluation of the configured attribute rules.
//!
//! Every rule is evaluated independently against the shared document and
//! returns its own error list; the lists are concatenated afterwards. A rule
//! whose query selects nothing is satisfied: optional fields may be absent.

use crate::error::{ErrorCode, ValidationError};
use crate::path::{normalize_location, scalar_text};
use crate::rules::{Rule, RuleSet};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::Value;
use std::fmt;

/// Validates documents against a [`RuleSet`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeValidator;

impl AttributeValidator {
    /// Returns every violation of every rule.
    ///
    /// Order across rules carries no meaning. Within one rule, violations
    /// follow the order in which the query selected the values.
    pub fn validate(&self, document: &Value, rules: &RuleSet) -> Vec<ValidationError> {
        #[cfg(feature = "parallel")]
        let per_rule: Vec<Vec<ValidationError>> = rules
            .as_slice()
            .par_iter()
            .map(|rule| evaluate_or_report(rule, document))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_rule: Vec<Vec<ValidationError>> = rules
            .as_slice()
            .iter()
            .map(|rule| evaluate_or_report(rule, document))
            .collect();

        per_rule.into_iter().flatten().collect()
    }
}

/// A rule that could not be evaluated to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleEvaluationError {
    /// Paths mode returned no path for a value selected in values mode.
    MissingPath { query: String, index: usize },
}

impl fmt::Display for RuleEvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEvaluationError::MissingPath { query, index } => {
                write!(f, "no resolved path for match {} of '{}'", index, query)
            }
        }
    }
}

impl std::error::Error for RuleEvaluationError {}

fn evaluate_or_report(rule: &Rule, document: &Value) -> Vec<ValidationError> {
    evaluate_or_report_with(rule, document, |doc| rule.path().resolve_paths(doc))
}

/// Evaluates one rule with a caller-supplied paths-mode resolver.
///
/// A rule that cannot be evaluated contributes a single
/// [`ErrorCode::RuleEvaluationFailed`] error located at its query text;
/// other rules are unaffected.
pub fn evaluate_or_report_with<F>(
    rule: &Rule,
    document: &Value,
    resolve_paths: F,
) -> Vec<ValidationError>
where
    F: FnOnce(&Value) -> Vec<String>,
{
    match evaluate_rule_with(rule, document, resolve_paths) {
        Ok(errors) => errors,
        Err(e) => {
            tracing::warn!(query = rule.path().as_str(), error = %e, "rule evaluation failed");
            vec![ValidationError::new(
                ErrorCode::RuleEvaluationFailed,
                rule.path().as_str(),
            )]
        }
    }
}

/// Evaluates one rule.
///
/// Paths are only resolved once a value fails, and then only once for the
/// whole rule.
pub fn evaluate_rule(
    rule: &Rule,
    document: &Value,
) -> Result<Vec<ValidationError>, RuleEvaluationError> {
    evaluate_rule_with(rule, document, |doc| rule.path().resolve_paths(doc))
}

/// [`evaluate_rule`] with the paths-mode query supplied by the caller.
pub fn evaluate_rule_with<F>(
    rule: &Rule,
    document: &Value,
    resolve_paths: F,
) -> Result<Vec<ValidationError>, RuleEvaluationError>
where
    F: FnOnce(&Value) -> Vec<String>,
{
    let values = rule.path().resolve_values(document);
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mut resolve_paths = Some(resolve_paths);
    let mut paths: Option<Vec<String>> = None;
    let mut errors = Vec::new();

    for (index, value) in values.iter().enumerate() {
        let code = match scalar_text(value) {
            Some(text) if rule.pattern().matches(&text) => continue,
            Some(_) => ErrorCode::InvalidInputParameter,
            None => ErrorCode::UnsupportedValueType,
        };

        let paths = paths.get_or_insert_with(|| {
            resolve_paths
                .take()
                .map(|resolve| resolve(document))
                .unwrap_or_default()
        });
        let raw = paths
            .get(index)
            .ok_or_else(|| RuleEvaluationError::MissingPath {
                query: rule.path().as_str().to_string(),
                index,
            })?;
        let location = normalize_location(raw);

        if code == ErrorCode::UnsupportedValueType {
            tracing::warn!(
                query = rule.path().as_str(),
                location = location.as_str(),
                "rule selected a composite value"
            );
        }
        errors.push(ValidationError::new(code, location));
    }

    Ok(errors)
}
