//! Run state as reported by the Jobs API.

use serde::{Deserialize, Serialize};

/// Result state value reported for failed runs and tasks.
pub const RESULT_STATE_FAILED: &str = "FAILED";

/// Result state value reported for successful runs and tasks.
pub const RESULT_STATE_SUCCESS: &str = "SUCCESS";

/// Life cycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunLifeCycleState {
    /// Run is waiting in the job queue.
    Queued,
    /// Run is being set up.
    Pending,
    /// Run is executing.
    Running,
    /// Run is being torn down.
    Terminating,
    /// Run has finished.
    Terminated,
    /// Run was skipped.
    Skipped,
    /// Run failed inside the service.
    InternalError,
    /// Run is blocked by an upstream dependency.
    Blocked,
    /// Run failed and waits for a retry.
    WaitingForRetry,
}

impl RunLifeCycleState {
    /// Returns true if the run cannot change state anymore.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated | Self::Skipped | Self::InternalError)
    }
}

/// State of a run: life cycle, result and a human readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub life_cycle_state: RunLifeCycleState,

    /// Result classification, empty while the run has none.
    #[serde(default)]
    pub result_state: String,

    #[serde(default)]
    pub state_message: String,
}

impl RunState {
    /// Create a new RunState.
    pub fn new(
        life_cycle_state: RunLifeCycleState,
        result_state: impl Into<String>,
        state_message: impl Into<String>,
    ) -> Self {
        Self {
            life_cycle_state,
            result_state: result_state.into(),
            state_message: state_message.into(),
        }
    }

    /// Parse a run state from its JSON encoding.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Encode the run state as a JSON string.
    pub fn to_json(&self) -> String {
        // Plain struct of strings, serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns true if the run reached a terminal life cycle state.
    pub fn is_terminal(&self) -> bool {
        self.life_cycle_state.is_terminal()
    }

    /// Returns true if the run finished successfully.
    pub fn is_successful(&self) -> bool {
        self.result_state == RESULT_STATE_SUCCESS
    }

    /// Returns true if the run finished with a failure.
    pub fn is_failed(&self) -> bool {
        self.result_state == RESULT_STATE_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let state = RunState::new(RunLifeCycleState::Terminated, "FAILED", "Task failed");
        let json = state.to_json();
        assert_eq!(
            json,
            r#"{"life_cycle_state":"TERMINATED","result_state":"FAILED","state_message":"Task failed"}"#
        );
        assert_eq!(RunState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_missing_result_fields_default_to_empty() {
        let state = RunState::from_json(r#"{"life_cycle_state":"RUNNING"}"#).unwrap();
        assert_eq!(state.result_state, "");
        assert_eq!(state.state_message, "");
        assert!(!state.is_terminal());
        assert!(!state.is_successful());
    }

    #[test]
    fn test_unknown_life_cycle_state_is_rejected() {
        assert!(RunState::from_json(r#"{"life_cycle_state":"EXPLODED"}"#).is_err());
        assert!(RunState::from_json("not json").is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunLifeCycleState::Terminated.is_terminal());
        assert!(RunLifeCycleState::InternalError.is_terminal());
        assert!(!RunLifeCycleState::WaitingForRetry.is_terminal());
        assert!(!RunLifeCycleState::Queued.is_terminal());
    }

    #[test]
    fn test_success_and_failure() {
        let ok = RunState::new(RunLifeCycleState::Terminated, "SUCCESS", "");
        assert!(ok.is_successful());
        assert!(!ok.is_failed());

        let failed = RunState::new(RunLifeCycleState::Terminated, "FAILED", "boom");
        assert!(failed.is_failed());
    }
}
