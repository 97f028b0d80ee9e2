use id_object_validator::rules::{Pattern, Rule, RuleSet};
use id_object_validator::{ConfigurationError, ValidationEngine, ValidatorConfig};
use std::collections::BTreeMap;

fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(q, p)| (q.to_string(), p.to_string()))
        .collect()
}

#[test]
fn load_compiles_every_entry() {
    let rules = RuleSet::load(&entries(&[
        ("$.email", "^[^@]+@[^@]+$"),
        ("$.phones[*]", "^\\d{10}$"),
    ]))
    .unwrap();
    assert_eq!(rules.len(), 2);
    let queries: Vec<&str> = rules.iter().map(|r| r.path().as_str()).collect();
    assert_eq!(queries, vec!["$.email", "$.phones[*]"]);
}

#[test]
fn empty_configuration_loads_empty_rule_set() {
    let rules = RuleSet::load(&BTreeMap::new()).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn malformed_regex_fails_the_whole_load() {
    let err = RuleSet::load(&entries(&[
        ("$.email", "^[^@]+@[^@]+$"),
        ("$.phone", "[0-9"),
    ]))
    .unwrap_err();
    match err {
        ConfigurationError::InvalidPattern { query, pattern, .. } => {
            assert_eq!(query, "$.phone");
            assert_eq!(pattern, "[0-9");
        }
        other => panic!("expected InvalidPattern, got {:?}", other),
    }
}

#[test]
fn malformed_query_fails_the_whole_load() {
    let err = RuleSet::load(&entries(&[("$.phones[", "^\\d+$")])).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidPathQuery { .. }));
}

#[test]
fn first_bad_entry_in_key_order_is_reported() {
    let err = RuleSet::load(&entries(&[("$.b", "("), ("$.a", "[")])).unwrap_err();
    match err {
        ConfigurationError::InvalidPattern { query, .. } => assert_eq!(query, "$.a"),
        other => panic!("expected InvalidPattern, got {:?}", other),
    }
}

#[test]
fn engine_construction_fails_on_malformed_regex() {
    let config = ValidatorConfig::new(entries(&[("$.email", "(unclosed")]));
    let result = ValidationEngine::from_config(&config);
    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidPattern { .. })
    ));
}

// ─── Pattern ────────────────────────────────────────────────────────────────

#[test]
fn pattern_matches_whole_value_only() {
    let pattern = Pattern::compile("$.zip", "\\d{5}").unwrap();
    assert!(pattern.matches("12345"));
    assert!(!pattern.matches("123456"));
    assert!(!pattern.matches("x12345"));
}

#[test]
fn pattern_alternation_is_anchored_as_a_group() {
    let pattern = Pattern::compile("$.kind", "abc|def").unwrap();
    assert!(pattern.matches("abc"));
    assert!(pattern.matches("def"));
    assert!(!pattern.matches("abcdef"));
}

#[test]
fn pattern_with_explicit_anchors_still_works() {
    let pattern = Pattern::compile("$.email", "^[^@]+@[^@]+$").unwrap();
    assert!(pattern.matches("a@b.com"));
    assert!(!pattern.matches("not-an-email"));
}

#[test]
fn unbalanced_pattern_is_not_repaired_by_anchoring() {
    assert!(Pattern::compile("$.x", "a)(b").is_err());
}

#[test]
fn pattern_keeps_source_text() {
    let rule = Rule::compile("$.email", "^.+$").unwrap();
    assert_eq!(rule.pattern().as_str(), "^.+$");
    assert_eq!(rule.path().as_str(), "$.email");
}
