//! Run and task run types returned by the Jobs API.

use crate::{RunId, RunState};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Details of a job run (`runs/get`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,

    /// URL of the run in the service UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_page_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<RunState>,

    /// Sub-task runs, in the order the service reports them.
    #[serde(default)]
    pub tasks: Vec<TaskRun>,
}

/// One sub-task of a multi-task run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRun {
    /// Run id of this task, used to fetch its output.
    pub run_id: RunId,

    /// Key of the task within the job definition.
    pub task_key: String,

    #[serde(default)]
    pub state: TaskRunState,
}

impl TaskRun {
    /// Create a task run with the given result state.
    pub fn new(run_id: impl Into<RunId>, task_key: impl Into<String>, result_state: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            task_key: task_key.into(),
            state: TaskRunState {
                result_state: result_state.into(),
            },
        }
    }

    /// Returns true if the task reported a failed result.
    pub fn is_failed(&self) -> bool {
        self.state.result_state == crate::status::RESULT_STATE_FAILED
    }
}

/// Partial state of a task run. Only the result is used here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunState {
    #[serde(default)]
    pub result_state: String,
}

/// Output of a task run (`runs/get-output`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    /// Error message, set when the task failed with an explicit error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_trace: Option<String>,

    /// Remaining fields (notebook output, logs, metadata).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunOutput {
    /// Create an output carrying an explicit error.
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Error information collected for one failed sub-task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTaskRecord {
    pub task_key: String,
    pub run_id: RunId,
    pub error: String,
}
