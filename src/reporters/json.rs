//! JSON reporter
//!
//! Outputs the event list as a pretty-printed JSON array.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::ChangeEvent;
use anyhow::Result;

/// Render events as JSON
pub fn render(events: &[ChangeEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_events;

    #[test]
    fn test_json_render_valid() {
        let events = test_events();
        let json_str = render(&events).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        let array = parsed.as_array().expect("array");
        assert_eq!(array.len(), 4);
        assert_eq!(array[0]["packageName"], "lodash");
        assert_eq!(array[1]["dependencyType"], "devDependency");
        assert_eq!(array[3]["changeType"], "deleted");
        assert_eq!(array[3]["newVersion"], "");
    }

    #[test]
    fn test_json_is_lossless() {
        let events = test_events();
        let json_str = render(&events).expect("render JSON");
        let back: Vec<ChangeEvent> = serde_json::from_str(&json_str).expect("parse events");
        assert_eq!(back, events);
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(render(&[]).expect("render JSON"), "[]");
    }
}
