//! The validation facade: serialize, evaluate, merge.

use crate::attribute::AttributeValidator;
use crate::config::ValidatorConfig;
use crate::error::{ConfigurationError, IdObjectIoError, ValidationError, ValidationFailure};
use crate::rules::RuleSet;
use crate::special::SpecialFieldValidator;
use serde::Serialize;
use serde_json::Value;

// ─── ValidationOutcome ──────────────────────────────────────────────────────

/// Result of validating one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Success,
    Failure(ValidationFailure),
}

impl ValidationOutcome {
    /// `Success` for an empty list, `Failure` otherwise.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationFailure::new(errors) {
            Some(failure) => ValidationOutcome::Failure(failure),
            None => ValidationOutcome::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success)
    }

    /// Collected errors; empty on success.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationOutcome::Success => &[],
            ValidationOutcome::Failure(failure) => failure.errors(),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            ValidationOutcome::Success => Ok(()),
            ValidationOutcome::Failure(failure) => Err(failure),
        }
    }
}

// ─── Extension points ───────────────────────────────────────────────────────

/// Turns an identity object into its JSON document text.
pub trait DocumentSerializer {
    fn to_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, IdObjectIoError>;
}

/// [`DocumentSerializer`] backed by `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl DocumentSerializer for JsonSerializer {
    fn to_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, IdObjectIoError> {
        serde_json::to_string(value).map_err(IdObjectIoError::Serialize)
    }
}

/// Object-safe validator interface handed to request handlers.
pub trait IdObjectValidator: Send + Sync {
    /// Validates an already-serialized identity document.
    fn validate_document(&self, document: &str) -> Result<ValidationOutcome, IdObjectIoError>;
}

// ─── ValidationEngine ───────────────────────────────────────────────────────

/// Validates identity objects against the configured rules plus the
/// mandatory CNIE number check.
///
/// Holds no per-call state; one engine may serve concurrent callers.
#[derive(Debug)]
pub struct ValidationEngine<S = JsonSerializer> {
    rules: RuleSet,
    attributes: AttributeValidator,
    special: SpecialFieldValidator,
    serializer: S,
}

impl ValidationEngine<JsonSerializer> {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_serializer(rules, JsonSerializer)
    }

    /// Compiles the configured rules and builds an engine.
    ///
    /// # Errors
    ///
    /// Any malformed query or pattern fails construction.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::new(RuleSet::from_config(config)?))
    }
}

impl<S: DocumentSerializer> ValidationEngine<S> {
    pub fn with_serializer(rules: RuleSet, serializer: S) -> Self {
        ValidationEngine {
            rules,
            attributes: AttributeValidator,
            special: SpecialFieldValidator,
            serializer,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Serializes `identity` and validates the resulting document.
    ///
    /// # Errors
    ///
    /// Returns [`IdObjectIoError`] if the object cannot be serialized. Data
    /// problems are never errors; they are reported in the outcome.
    pub fn validate<T: Serialize + ?Sized>(
        &self,
        identity: &T,
    ) -> Result<ValidationOutcome, IdObjectIoError> {
        let document = self.serializer.to_document(identity)?;
        self.validate_text(&document)
    }

    /// Validates an already-serialized identity document.
    ///
    /// # Errors
    ///
    /// Returns [`IdObjectIoError::Document`] if `document` is not JSON.
    pub fn validate_document(
        &self,
        document: &str,
    ) -> Result<ValidationOutcome, IdObjectIoError> {
        self.validate_text(document)
    }

    fn validate_text(&self, document: &str) -> Result<ValidationOutcome, IdObjectIoError> {
        let value: Value = serde_json::from_str(document).map_err(IdObjectIoError::Document)?;
        Ok(self.validate_value(&value))
    }

    /// Validates a parsed document.
    pub fn validate_value(&self, document: &Value) -> ValidationOutcome {
        let _span = tracing::debug_span!("validate_id_object", rules = self.rules.len()).entered();

        let (mut errors, special) =
            run_validators(&self.attributes, &self.special, &self.rules, document);
        errors.extend(special);

        if errors.is_empty() {
            tracing::debug!("identity document accepted");
        } else {
            tracing::debug!(errors = errors.len(), "identity document rejected");
        }
        ValidationOutcome::from_errors(errors)
    }
}

#[cfg(feature = "parallel")]
fn run_validators(
    attributes: &AttributeValidator,
    special: &SpecialFieldValidator,
    rules: &RuleSet,
    document: &Value,
) -> (Vec<ValidationError>, Option<ValidationError>) {
    rayon::join(
        || attributes.validate(document, rules),
        || special.validate(document),
    )
}

#[cfg(not(feature = "parallel"))]
fn run_validators(
    attributes: &AttributeValidator,
    special: &SpecialFieldValidator,
    rules: &RuleSet,
    document: &Value,
) -> (Vec<ValidationError>, Option<ValidationError>) {
    (attributes.validate(document, rules), special.validate(document))
}

impl<S: DocumentSerializer + Send + Sync> IdObjectValidator for ValidationEngine<S> {
    fn validate_document(&self, document: &str) -> Result<ValidationOutcome, IdObjectIoError> {
        self.validate_text(document)
    }
}
