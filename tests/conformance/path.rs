use id_object_validator::error::ConfigurationError;
use id_object_validator::path::{PathExpression, normalize_location, scalar_text};
use serde_json::json;

// ─── normalize_location ─────────────────────────────────────────────────────

#[test]
fn normalize_nested_path_with_index() {
    assert_eq!(normalize_location("$['a']['b'][2]"), "a/b/2");
}

#[test]
fn normalize_single_key() {
    assert_eq!(normalize_location("$['cnieNumber']"), "cnieNumber");
}

#[test]
fn normalize_index_then_key() {
    assert_eq!(
        normalize_location("$['identity']['fullName'][0]['language']"),
        "identity/fullName/0/language"
    );
}

#[test]
fn normalize_root() {
    assert_eq!(normalize_location("$"), "");
}

#[test]
fn normalize_drops_quotes_inside_keys() {
    assert_eq!(normalize_location(r"$['O\'Brien']"), r"O\Brien");
}

#[test]
fn normalize_is_deterministic() {
    let raw = "$['x'][10]['y']";
    assert_eq!(normalize_location(raw), normalize_location(raw));
}

// ─── parse ──────────────────────────────────────────────────────────────────

#[test]
fn parse_rejects_query_without_root() {
    let err = PathExpression::parse("email").unwrap_err();
    assert!(
        matches!(err, ConfigurationError::InvalidPathQuery { ref query, .. } if query == "email"),
        "got {:?}",
        err
    );
}

#[test]
fn parse_rejects_unterminated_bracket() {
    assert!(PathExpression::parse("$.phones[").is_err());
}

#[test]
fn parse_keeps_source_text() {
    let path = PathExpression::parse("$.identity.phones[*]").unwrap();
    assert_eq!(path.as_str(), "$.identity.phones[*]");
    assert_eq!(path.to_string(), "$.identity.phones[*]");
}

// ─── resolve ────────────────────────────────────────────────────────────────

#[test]
fn missing_field_resolves_to_nothing() {
    let path = PathExpression::parse("$.identity.email").unwrap();
    let doc = json!({"identity": {"phone": "1"}});
    assert!(path.resolve_values(&doc).is_empty());
    assert!(path.resolve_paths(&doc).is_empty());
    assert!(path.resolve(&doc).is_empty());
}

#[test]
fn missing_parent_resolves_to_nothing() {
    let path = PathExpression::parse("$.identity.addresses[*].city").unwrap();
    assert!(path.resolve_values(&json!({"other": 1})).is_empty());
}

#[test]
fn single_match_has_one_path() {
    let path = PathExpression::parse("$.email").unwrap();
    let doc = json!({"email": "a@b.com"});
    assert_eq!(path.resolve_values(&doc), vec![&json!("a@b.com")]);
    assert_eq!(path.resolve_paths(&doc), vec!["$['email']".to_string()]);
}

#[test]
fn wildcard_values_and_paths_share_order() {
    let path = PathExpression::parse("$.phones[*]").unwrap();
    let doc = json!({"phones": ["1", "2", "3"]});
    let values = path.resolve_values(&doc);
    let paths = path.resolve_paths(&doc);
    assert_eq!(values, vec![&json!("1"), &json!("2"), &json!("3")]);
    assert_eq!(
        paths,
        vec!["$['phones'][0]", "$['phones'][1]", "$['phones'][2]"]
    );
}

#[test]
fn resolve_pairs_values_with_locations() {
    let path = PathExpression::parse("$.identity.fullName[*].value").unwrap();
    let doc = json!({"identity": {"fullName": [
        {"language": "eng", "value": "Jane"},
        {"language": "fra", "value": "Jeanne"}
    ]}});
    let result = path.resolve(&doc);
    assert_eq!(result.len(), 2);
    let pairs: Vec<(String, String)> = result
        .iter()
        .map(|m| (m.location(), m.value.as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("identity/fullName/0/value".to_string(), "Jane".to_string()),
            ("identity/fullName/1/value".to_string(), "Jeanne".to_string()),
        ]
    );
}

#[test]
fn descendant_query_reaches_nested_values() {
    let path = PathExpression::parse("$..postalCode").unwrap();
    let doc = json!({"a": {"postalCode": "1"}, "b": [{"postalCode": "2"}]});
    let mut locations: Vec<String> = path.resolve(&doc).iter().map(|m| m.location()).collect();
    locations.sort();
    assert_eq!(locations, vec!["a/postalCode", "b/0/postalCode"]);
}

// ─── scalar_text ────────────────────────────────────────────────────────────

#[test]
fn scalar_text_of_scalars() {
    assert_eq!(scalar_text(&json!("x")), Some("x".to_string()));
    assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
    assert_eq!(scalar_text(&json!(1.5)), Some("1.5".to_string()));
    assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
    assert_eq!(scalar_text(&json!(null)), Some("null".to_string()));
}

#[test]
fn scalar_text_keeps_digits_of_wide_integers() {
    let value: serde_json::Value = serde_json::from_str("99999999999999999999").unwrap();
    assert_eq!(scalar_text(&value), Some("99999999999999999999".to_string()));
}

#[test]
fn scalar_text_of_composites_is_none() {
    assert_eq!(scalar_text(&json!([1, 2])), None);
    assert_eq!(scalar_text(&json!({"a": 1})), None);
}
