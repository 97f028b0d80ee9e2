//! The mandatory national-identifier (CNIE number) check.
//!
//! This rule is compiled in rather than configured, and unlike attribute
//! rules an absent field is a violation.

use crate::error::ValidationError;
use crate::path::{normalize_location, scalar_text};
use crate::rules::Rule;
use serde_json::Value;
use std::sync::LazyLock;

/// Where the CNIE number lives in an identity document.
pub const CNIE_NUMBER_PATH: &str = "$.identity.cnieNumber";

/// Accepted CNIE number format.
pub const CNIE_NUMBER_REGEX: &str = r"^[A-Z]{1,2}[0-9]{1,8}$";

/// Normalized path of [`CNIE_NUMBER_PATH`], reported when the field is absent.
const CNIE_NUMBER_NORMALIZED_PATH: &str = "$['identity']['cnieNumber']";

static CNIE_NUMBER_RULE: LazyLock<Rule> =
    LazyLock::new(|| Rule::compile(CNIE_NUMBER_PATH, CNIE_NUMBER_REGEX).unwrap());

#[derive(Clone, Copy, Debug, Default)]
pub struct SpecialFieldValidator;

impl SpecialFieldValidator {
    pub fn rule(&self) -> &'static Rule {
        &CNIE_NUMBER_RULE
    }

    /// Checks the first value at [`CNIE_NUMBER_PATH`].
    ///
    /// Absent and composite values never match.
    pub fn validate(&self, document: &Value) -> Option<ValidationError> {
        let rule = self.rule();
        let matched = rule
            .path()
            .resolve_values(document)
            .first()
            .and_then(|v| scalar_text(v))
            .is_some_and(|text| rule.pattern().matches(&text));
        if matched {
            return None;
        }

        let raw = rule
            .path()
            .resolve_paths(document)
            .into_iter()
            .next()
            .unwrap_or_else(|| CNIE_NUMBER_NORMALIZED_PATH.to_string());
        Some(ValidationError::invalid_input(normalize_location(&raw)))
    }
}
