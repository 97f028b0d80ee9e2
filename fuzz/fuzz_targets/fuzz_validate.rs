#![no_main]

use id_object_validator::{ValidationEngine, ValidationOutcome};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static ENGINE: LazyLock<ValidationEngine> = LazyLock::new(|| {
    id_object_validator::load(
        r#"
validation:
  "$.identity.email": "^[^@]+@[^@]+$"
  "$.identity.phones[*]": "^\\d{10}$"
  "$..postalCode": "^\\d{5}$"
"#,
    )
    .unwrap()
});

fuzz_target!(|data: &str| {
    if let Ok(outcome) = ENGINE.validate_document(data) {
        match outcome {
            ValidationOutcome::Success => {}
            ValidationOutcome::Failure(failure) => assert!(!failure.errors().is_empty()),
        }
    }
});
