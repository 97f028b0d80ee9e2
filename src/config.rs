//! Validator configuration.
//!
//! The rule map lives under `validation`, either at the top level or nested
//! under the `mosip.id` prefix used by identity platforms:
//!
//! ```yaml
//! mosip:
//!   id:
//!     validation:
//!       "$.identity.email": "^[^@]+@[^@]+$"
//! ```
//!
//! The same map can be written as Java-style properties, one rule per line:
//!
//! ```text
//! mosip.id.validation[$.identity.email]=^[^@]+@[^@]+$
//! ```

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

const PROPERTY_PREFIX: &str = "mosip.id.validation";

/// Immutable configuration handed to the engine at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Path query to regex pattern.
    #[serde(default)]
    pub validation: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    validation: BTreeMap<String, String>,
    #[serde(default)]
    mosip: Option<MosipSection>,
}

#[derive(Deserialize)]
struct MosipSection {
    #[serde(default)]
    id: Option<IdSection>,
}

#[derive(Deserialize)]
struct IdSection {
    #[serde(default)]
    validation: BTreeMap<String, String>,
}

impl ValidatorConfig {
    pub fn new(validation: BTreeMap<String, String>) -> Self {
        ValidatorConfig { validation }
    }

    /// Parses YAML configuration text.
    pub fn from_yaml(input: &str) -> Result<Self, ConfigurationError> {
        if input.trim().is_empty() {
            return Err(ConfigurationError::Parse("empty input".to_string()));
        }
        let value: Value = serde_saphyr::from_str(input)
            .map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parses JSON configuration text.
    pub fn from_json(input: &str) -> Result<Self, ConfigurationError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parses `mosip.id.validation[<query>]=<pattern>` property lines.
    ///
    /// The separator may be `=` or `:`, with optional whitespace around it.
    /// Blank lines and `#`/`!` comments are skipped, as are keys outside the
    /// `mosip.id.validation` prefix. Values are unescaped the way Java
    /// properties files are, so `\\d` in the file is the regex `\d`.
    pub fn from_properties(input: &str) -> Result<Self, ConfigurationError> {
        let mut validation = BTreeMap::new();
        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(rest) = line.strip_prefix(PROPERTY_PREFIX) else {
                continue;
            };
            let rest = rest.strip_prefix('.').unwrap_or(rest);
            let (query, pattern) = split_rule_entry(rest).ok_or_else(|| {
                ConfigurationError::Parse(format!(
                    "line {}: expected {}[<query>]=<pattern>",
                    index + 1,
                    PROPERTY_PREFIX
                ))
            })?;
            validation.insert(query.trim().to_string(), unescape_property(pattern.trim()));
        }
        Ok(ValidatorConfig { validation })
    }

    /// Reads a configuration file, choosing the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            Some("json") => Self::from_json(&text),
            Some("properties") => Self::from_properties(&text),
            other => Err(ConfigurationError::Parse(format!(
                "unsupported configuration format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    fn from_value(value: Value) -> Result<Self, ConfigurationError> {
        if !value.is_object() {
            return Err(ConfigurationError::Parse(
                "configuration root must be a mapping".to_string(),
            ));
        }
        let raw: RawConfig =
            serde_json::from_value(value).map_err(|e| ConfigurationError::Parse(e.to_string()))?;

        let mut validation = raw.validation;
        if let Some(nested) = raw.mosip.and_then(|m| m.id) {
            validation.extend(nested.validation);
        }
        Ok(ValidatorConfig { validation })
    }
}

/// Splits `[<query>]=<pattern>` at the first `]` followed by a separator.
fn split_rule_entry(rest: &str) -> Option<(&str, &str)> {
    let body = rest.strip_prefix('[')?;
    body.match_indices(']').find_map(|(end, _)| {
        let after = body[end + 1..].trim_start();
        let pattern = after.strip_prefix('=').or_else(|| after.strip_prefix(':'))?;
        Some((&body[..end], pattern))
    })
}

fn unescape_property(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
