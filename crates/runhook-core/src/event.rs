//! Events emitted by the run polling trigger.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::task::FailedTaskRecord;
use crate::{RunId, RunState};

/// Keys every trigger event must carry, checked in this order.
pub const TRIGGER_EVENT_KEYS: [&str; 4] = ["run_id", "run_page_url", "run_state", "errors"];

/// Check that `event` carries every trigger key and a parseable run state.
///
/// The run state may be JSON-encoded into a string, which is how the trigger
/// emits it, or inlined as an object. Returns the parsed state.
pub fn validate_trigger_event(event: &Value) -> Result<RunState, CoreError> {
    for key in TRIGGER_EVENT_KEYS {
        if event.get(key).is_none() {
            return Err(CoreError::MissingField {
                key: key.to_string(),
                event: event.to_string(),
            });
        }
    }
    parse_run_state(&event["run_state"])
}

fn parse_run_state(raw: &Value) -> Result<RunState, CoreError> {
    match raw {
        Value::String(s) => RunState::from_json(s).map_err(|_| CoreError::MalformedRunState {
            raw: s.clone(),
        }),
        other => serde_json::from_value(other.clone()).map_err(|_| {
            CoreError::MalformedRunState {
                raw: other.to_string(),
            }
        }),
    }
}

/// Decoded trigger event.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub run_id: RunId,
    pub run_page_url: String,
    pub run_state: RunState,
    /// Failed sub-tasks of the run, empty unless it failed.
    pub errors: Vec<FailedTaskRecord>,
}

impl TriggerEvent {
    /// Validate and decode an event.
    pub fn from_event(event: &Value) -> Result<Self, CoreError> {
        let run_state = validate_trigger_event(event)?;
        Ok(Self {
            run_id: field(event, "run_id")?,
            run_page_url: field(event, "run_page_url")?,
            run_state,
            errors: field(event, "errors")?,
        })
    }

    /// Build the event the way the trigger emits it.
    pub fn to_event(&self) -> Value {
        json!({
            "run_id": self.run_id,
            "run_page_url": self.run_page_url,
            "run_state": self.run_state.to_json(),
            "errors": self.errors,
        })
    }
}

fn field<T: DeserializeOwned>(event: &Value, key: &str) -> Result<T, CoreError> {
    serde_json::from_value(event[key].clone()).map_err(|e| CoreError::InvalidField {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
