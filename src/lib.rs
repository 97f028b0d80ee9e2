//! Path-pattern validation of identity objects.
//!
//! Identity records submitted to authentication and eKYC services are checked
//! field by field: each configured rule pairs a JSONPath query with a regex
//! that every selected value must match in full. A compiled-in rule
//! additionally requires a well-formed CNIE number. Every violation is
//! collected and reported with its location in the document.
//!
//! ```text
//! ValidatorConfig → RuleSet → ValidationEngine
//! identity object → serialize → [attribute rules ∥ CNIE number] → ValidationOutcome
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let engine = id_object_validator::load(r#"
//! validation:
//!   "$.identity.email": "[^@]+@[^@]+"
//!   "$.identity.phones[*]": "\\d{10}"
//! "#).expect("valid configuration");
//!
//! let identity = json!({
//!     "identity": {
//!         "cnieNumber": "AB123456",
//!         "email": "jane@example.org",
//!         "phones": ["0612345678", "bad"]
//!     }
//! });
//!
//! let outcome = engine.validate(&identity).expect("serializable");
//! assert_eq!(outcome.errors().len(), 1);
//! assert_eq!(outcome.errors()[0].location, "identity/phones/1");
//! ```
//!
//! # Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `parallel` | yes     | Evaluate rules on the `rayon` thread pool. |
//! | `cli`      | no      | Build the `id-validate` command-line tool. |

pub mod attribute;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod rules;
pub mod special;

pub use attribute::AttributeValidator;
pub use config::ValidatorConfig;
pub use engine::{
    DocumentSerializer, IdObjectValidator, JsonSerializer, ValidationEngine, ValidationOutcome,
};
pub use error::*;
pub use path::{PathExpression, normalize_location};
pub use rules::{Rule, RuleSet};
pub use special::SpecialFieldValidator;

/// Convenience entry point: YAML configuration text to a ready engine.
///
/// # Errors
///
/// Returns [`ConfigurationError`] if the text does not parse or any rule
/// fails to compile.
pub fn load(config_yaml: &str) -> Result<ValidationEngine, ConfigurationError> {
    let config = ValidatorConfig::from_yaml(config_yaml)?;
    ValidationEngine::from_config(&config)
}
