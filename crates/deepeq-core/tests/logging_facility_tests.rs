#![allow(clippy::unwrap_used, clippy::expect_used)]

use deepeq_core::core_types::schema::{
    EVENT_END, EVENT_END_DIVERGENCE, EVENT_START, FIELD_DIV_CODE, FIELD_DIV_PATH,
    FIELD_DURATION_MS, FIELD_VISITED, OP_DEEP_EQUAL,
};
use deepeq_core::errors::Divergence;
use deepeq_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use deepeq_core::{deep_equal, log_op_divergence, log_op_end, log_op_start, reflect_record};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.events_for(op_name, EVENT_START);
    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_divergence_includes_code_and_path() {
    let capture = init_test_capture();
    let op_name = "test_log_op_divergence_unique_3";

    let divergence = Divergence::Uncomparable.at_index(2).in_field("handlers");
    log_op_divergence!(op_name, divergence, duration_ms = 10);

    let events = capture.events_for(op_name, EVENT_END_DIVERGENCE);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_DIV_CODE), Some("DIV_UNCOMPARABLE"));
    assert_eq!(events[0].field(FIELD_DIV_PATH), Some(".handlers[2]"));
    assert_eq!(events[0].level, tracing::Level::INFO);
}

// Each comparison test uses its own type so events can be told apart from
// those of tests running concurrently.

struct EqualProbe {
    values: Vec<u8>,
}

reflect_record!(EqualProbe { values });

struct DivergentProbe {
    label: String,
}

reflect_record!(DivergentProbe { label });

fn events_for_type(events: Vec<CapturedEvent>, type_fragment: &str) -> Vec<CapturedEvent> {
    events
        .into_iter()
        .filter(|e| {
            e.field("left_type")
                .is_some_and(|name| name.contains(type_fragment))
        })
        .collect()
}

#[test]
fn test_deep_equal_logs_start_and_end() {
    let capture = init_test_capture();

    let a = EqualProbe { values: vec![1, 2] };
    let b = EqualProbe { values: vec![1, 2] };
    assert!(deep_equal(&a, &b).is_ok());

    let starts = events_for_type(capture.events_for(OP_DEEP_EQUAL, EVENT_START), "EqualProbe");
    assert_eq!(starts.len(), 1);
    assert!(starts[0]
        .field("right_type")
        .is_some_and(|name| name.contains("EqualProbe")));

    let ends = events_for_type(capture.events_for(OP_DEEP_EQUAL, EVENT_END), "EqualProbe");
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field(FIELD_VISITED), Some("1"));
    assert!(ends[0].field(FIELD_DURATION_MS).is_some());
    assert!(ends[0]
        .component
        .as_deref()
        .is_some_and(|c| c.starts_with("deepeq_core")));

    let divergences = events_for_type(
        capture.events_for(OP_DEEP_EQUAL, EVENT_END_DIVERGENCE),
        "EqualProbe",
    );
    assert!(divergences.is_empty());
}

#[test]
fn test_deep_equal_logs_divergence() {
    let capture = init_test_capture();

    let a = DivergentProbe {
        label: "a".to_string(),
    };
    let b = DivergentProbe {
        label: "b".to_string(),
    };
    assert!(deep_equal(&a, &b).is_err());

    let divergences = events_for_type(
        capture.events_for(OP_DEEP_EQUAL, EVENT_END_DIVERGENCE),
        "DivergentProbe",
    );
    assert_eq!(divergences.len(), 1);
    assert_eq!(divergences[0].field(FIELD_DIV_CODE), Some("DIV_VALUE_MISMATCH"));
    assert_eq!(divergences[0].field(FIELD_DIV_PATH), Some(".label"));

    let ends = events_for_type(capture.events_for(OP_DEEP_EQUAL, EVENT_END), "DivergentProbe");
    assert!(ends.is_empty());
}
