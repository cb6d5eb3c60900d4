//! Canonical schema constants for structured comparison logging
//!
//! Every field key and event name emitted by the comparator lives here so
//! log consumers and test captures agree on spelling.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_LEFT_TYPE: &str = "left_type";
pub const FIELD_RIGHT_TYPE: &str = "right_type";
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_VISITED: &str = "visited";

// Divergence fields
pub const FIELD_DIV_CODE: &str = "div.code";
pub const FIELD_DIV_PATH: &str = "div.path";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_DIVERGENCE: &str = "end_divergence";
pub const EVENT_CYCLE_SHORT_CIRCUIT: &str = "cycle_short_circuit";

// Canonical operation names
pub const OP_DEEP_EQUAL: &str = "deep_equal";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_DIV_CODE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_DIVERGENCE.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [
            EVENT_START,
            EVENT_END,
            EVENT_END_DIVERGENCE,
            EVENT_CYCLE_SHORT_CIRCUIT,
        ];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
