//! Logging assertions for the diff operation.

use kdelta_core::diff::diff_values;
use kdelta_core::kdelta_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CHANGED_COUNT, FIELD_DURATION_MS,
    FIELD_ERROR_COUNT, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_OUTCOME, FIELD_SELECTOR,
    FIELD_SELECTOR_COUNT, OP_DIFF, OP_DIFF_FIELD,
};
use kdelta_core::logging_facility::test_capture::TestCaptureLayer;
use kdelta_core::UpdateSetting;
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn test_diff_logs_start_and_end_with_counts() {
    let (layer, capture) = TestCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let settings = UpdateSetting::new(["a", "b", "c"], true);
        let text = diff_values(&json!({"a": 1, "b": 1}), &json!({"a": 2, "b": 2}), &settings)
            .unwrap();
        assert!(text.starts_with("a:\n"));
    });

    capture.assert_event_exists(OP_DIFF, EVENT_START);
    capture.assert_event_exists(OP_DIFF, EVENT_END);

    let events = capture.events_for_op(OP_DIFF);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].field(FIELD_SELECTOR_COUNT), Some("3"));
    assert_eq!(events[1].field(FIELD_CHANGED_COUNT), Some("2"));
    assert_eq!(events[1].field(FIELD_ERROR_COUNT), Some("0"));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_diff_failure_logs_error_code() {
    let (layer, capture) = TestCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let settings = UpdateSetting::new(["a[", ">"], true);
        assert!(diff_values(&json!({}), &json!({}), &settings).is_err());
    });

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_DIFF) && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    assert_eq!(errors, 1);

    let end = capture
        .events_for_op(OP_DIFF)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .unwrap();
    assert_eq!(end.field(FIELD_ERR_CODE), Some("ERR_DIFF_FAILED"));
    assert_eq!(end.field(FIELD_ERR_KIND), Some("DiffFailed"));
    assert_eq!(end.field(FIELD_ERROR_COUNT), Some("2"));
}

#[test]
fn test_each_selector_is_classified_at_debug() {
    let (layer, capture) = TestCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        let settings = UpdateSetting::new(["same", "moved", "bad["], true);
        let _ = diff_values(
            &json!({"same": 1, "moved": 1}),
            &json!({"same": 1, "moved": 2}),
            &settings,
        );
    });

    let outcomes: Vec<(String, String)> = capture
        .events_for_op(OP_DIFF_FIELD)
        .into_iter()
        .filter_map(|e| {
            Some((
                e.field(FIELD_SELECTOR)?.to_string(),
                e.field(FIELD_OUTCOME)?.to_string(),
            ))
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("same".to_string(), "no_change".to_string()),
            ("moved".to_string(), "changed".to_string()),
            ("bad[".to_string(), "error".to_string()),
        ]
    );
}
