//! Integration tests for the field-path diff engine.
//!
//! Snapshots are plain serializable structs shaped like Kubernetes objects.

use kdelta_core::diff::{compute_report, diff, DiffError, ObjectSide};
use kdelta_core::UpdateSetting;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
struct Object {
    spec: Spec,
    status: Status,
    data: Data,
    rules: Rules,
    other: Other,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Other {
    foo: String,
    annotations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Spec {
    port: i64,
    containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Container {
    image: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Status {
    replicas: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Data {
    properties: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Rules {
    verbs: String,
}

fn with_image(image: &str, foo: &str) -> Object {
    Object {
        spec: Spec {
            containers: vec![Container {
                image: image.to_string(),
            }],
            ..Spec::default()
        },
        other: Other {
            foo: foo.to_string(),
            annotations: None,
        },
        ..Object::default()
    }
}

fn with_replicas(replicas: i64, foo: &str) -> Object {
    Object {
        status: Status { replicas },
        other: Other {
            foo: foo.to_string(),
            annotations: None,
        },
        ..Object::default()
    }
}

fn with_annotations(pairs: Option<&[(&str, &str)]>) -> Object {
    Object {
        status: Status { replicas: 1 },
        other: Other {
            foo: String::new(),
            annotations: pairs.map(|pairs| {
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }),
        },
        ..Object::default()
    }
}

fn settings(fields: &[&str]) -> UpdateSetting {
    UpdateSetting::new(fields.iter().copied(), true)
}

fn expected_diff(path: &str, old: &str, new: &str) -> String {
    format!("{path}:\n\t-: {old}\n\t+: {new}\n")
}

// ---------------------------------------------------------------------------
// Changes
// ---------------------------------------------------------------------------

#[test]
fn test_spec_diff_through_wildcard() {
    let old = with_image("nginx:1.14", "bar");
    let new = with_image("nginx:latest", "bar");

    let actual = diff(&old, &new, &settings(&["spec.containers[*].image"])).unwrap();

    assert_eq!(
        actual,
        expected_diff("spec.containers[*].image", "nginx:1.14", "nginx:latest")
    );
}

#[test]
fn test_annotation_key_with_escaped_separators() {
    let old = Object {
        other: Other {
            foo: String::new(),
            annotations: Some(BTreeMap::from([(
                "app.kubernetes.io/version".to_string(),
                "1".to_string(),
            )])),
        },
        ..Object::default()
    };
    let mut new = old.clone();
    new.other.annotations = Some(BTreeMap::from([(
        "app.kubernetes.io/version".to_string(),
        "2".to_string(),
    )]));
    let selector = r"other.annotations.app\.kubernetes\.io\/version";

    let actual = diff(&old, &new, &settings(&[selector])).unwrap();

    assert_eq!(actual, expected_diff(selector, "1", "2"));
}

#[test]
fn test_status_diff() {
    let actual = diff(
        &with_replicas(1, "bar"),
        &with_replicas(2, "bar"),
        &settings(&["status.replicas"]),
    )
    .unwrap();
    assert_eq!(actual, expected_diff("status.replicas", "1", "2"));
}

#[test]
fn test_data_and_rules_diffs() {
    let mut old = Object::default();
    old.data.properties = "color: blue".to_string();
    old.rules.verbs = "list".to_string();
    let mut new = old.clone();
    new.data.properties = "color: red".to_string();

    assert_eq!(
        diff(&old, &new, &settings(&["data.properties"])).unwrap(),
        expected_diff("data.properties", "color: blue", "color: red")
    );

    new.rules.verbs = "watch".to_string();
    assert_eq!(
        diff(&old, &new, &settings(&["rules.verbs"])).unwrap(),
        expected_diff("rules.verbs", "list", "watch")
    );
}

#[test]
fn test_unescaped_slash_selector_does_not_hide_sibling_change() {
    let old = json!({
        "metadata": {"annotations": {"deployment.kubernetes.io/revision": "1"}},
        "status": {"replicas": 1}
    });
    let new = json!({
        "metadata": {"annotations": {"deployment.kubernetes.io/revision": "2"}},
        "status": {"replicas": 2}
    });
    let revision = r"metadata.annotations.deployment\.kubernetes\.io/revision";

    let actual = diff(&old, &new, &settings(&[revision, "status.replicas"])).unwrap();
    assert_eq!(actual, expected_diff(revision, "1", "2"));

    let actual = diff(&old, &new, &settings(&["status.replicas "])).unwrap();
    assert_eq!(actual, expected_diff("status.replicas ", "1", "2"));
}

// ---------------------------------------------------------------------------
// No change
// ---------------------------------------------------------------------------

#[test]
fn test_unwatched_field_change_is_ignored() {
    let old = with_image("nginx:1.14", "bar");
    let new = with_image("nginx:1.14", "boo");

    for selector in ["metadata.name", "metadata.labels", "spec.containers[*].image"] {
        assert_eq!(diff(&old, &new, &settings(&[selector])).unwrap(), "");
    }
}

#[test]
fn test_missing_field_is_not_an_error() {
    let actual = diff(
        &with_replicas(1, "bar"),
        &with_replicas(2, "bar"),
        &settings(&["status.foo", "status.replicas"]),
    )
    .unwrap();
    assert_eq!(actual, expected_diff("status.replicas", "1", "2"));
}

// ---------------------------------------------------------------------------
// Missing values
// ---------------------------------------------------------------------------

#[test]
fn test_missing_property_in_old_object() {
    let old = with_annotations(None);
    let new = with_annotations(Some(&[("foo", "bar")]));
    assert_eq!(
        diff(&old, &new, &settings(&["other.annotations.foo"])).unwrap(),
        expected_diff("other.annotations.foo", "<none>", "bar")
    );
}

#[test]
fn test_missing_property_in_new_object() {
    let old = with_annotations(Some(&[("foo", "bar")]));
    let new = with_annotations(None);
    assert_eq!(
        diff(&old, &new, &settings(&["other.annotations.foo"])).unwrap(),
        expected_diff("other.annotations.foo", "bar", "<none>")
    );
}

#[test]
fn test_empty_value_is_distinct_from_missing() {
    let old = with_annotations(Some(&[("foo", "")]));
    let new = with_annotations(None);
    assert_eq!(
        diff(&old, &new, &settings(&["other.annotations.foo"])).unwrap(),
        expected_diff("other.annotations.foo", "", "<none>")
    );
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn test_first_changed_selector_wins() {
    let mut old = with_replicas(1, "bar");
    old.data.properties = "a".to_string();
    let mut new = with_replicas(2, "bar");
    new.data.properties = "b".to_string();

    let actual = diff(&old, &new, &settings(&["data.properties", "status.replicas"])).unwrap();
    assert_eq!(actual, expected_diff("data.properties", "a", "b"));
    assert!(!actual.contains("status.replicas"));

    let actual = diff(&old, &new, &settings(&["status.replicas", "data.properties"])).unwrap();
    assert_eq!(actual, expected_diff("status.replicas", "1", "2"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_selector_error_message() {
    let mut old = Object::default();
    old.rules.verbs = "list".to_string();
    old.other.foo = "bar".to_string();
    let mut new = old.clone();
    new.other.foo = "boo".to_string();

    let err = diff(&old, &new, &settings(&["><@>!$@435metadata.name"])).unwrap_err();

    assert_eq!(
        err.to_string(),
        "while getting diff: 1 error occurred:\n\t* while finding value in old obj from jsonpath \"><@>!$@435metadata.name\": unrecognized character in action: U+003E '>'"
    );
}

// Change and syntax error in the same call: the error wins and the change is
// discarded.
#[test]
fn test_error_takes_precedence_over_earlier_change() {
    let old = with_replicas(1, "bar");
    let new = with_replicas(2, "bar");
    let selectors = settings(&["status.replicas", "status[", "status.foo"]);

    let report = compute_report(
        &serde_json::to_value(&old).unwrap(),
        &serde_json::to_value(&new).unwrap(),
        &selectors,
    );
    assert_eq!(report.changes.len(), 1, "the change is still detected");

    let err = diff(&old, &new, &selectors).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("while getting diff: 1 error occurred:\n\t* "));
    assert!(message.contains(r#"from jsonpath "status[": unterminated array"#));
    assert!(!message.contains("-: 1"));
}

#[test]
fn test_every_selector_error_is_collected_in_order() {
    let old = with_replicas(1, "bar");
    let new = with_replicas(2, "bar");

    let err = diff(&old, &new, &settings(&[">", "status.replicas", "a..", "b[x]"])).unwrap_err();

    let errors = match &err {
        DiffError::Fields(errors) => errors,
        other => panic!("expected field errors, got {other:?}"),
    };
    let selectors: Vec<&str> = errors.iter().map(|e| e.selector.as_str()).collect();
    assert_eq!(selectors, vec![">", "a..", "b[x]"]);
    assert!(errors.iter().all(|e| e.side == ObjectSide::Old));
    assert!(err
        .to_string()
        .starts_with("while getting diff: 3 errors occurred:\n\t* "));
    assert_eq!(err.to_string().matches("\n\t* ").count(), 3);
}

// ---------------------------------------------------------------------------
// include_diff
// ---------------------------------------------------------------------------

#[test]
fn test_include_diff_does_not_change_the_algorithm() {
    let old = with_replicas(1, "bar");
    let new = with_replicas(2, "bar");
    let with_text = UpdateSetting::new(["status.replicas"], true);
    let without_text = UpdateSetting::new(["status.replicas"], false);

    assert_eq!(
        diff(&old, &new, &with_text).unwrap(),
        diff(&old, &new, &without_text).unwrap()
    );
}
