//! Error extraction for failed sub-tasks of a run.
//!
//! Task selection and error resolution live in [`failed_tasks`] and
//! [`failed_task_record`]. The blocking and async entry points only differ in
//! how they call the fetcher.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::task::{FailedTaskRecord, RunInfo, RunOutput, TaskRun};
use crate::{RunId, RunState};

/// Fetches the output of a task run, blocking the caller.
pub trait RunOutputFetcher {
    fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, CoreError>;
}

/// Fetches the output of a task run without blocking the executor.
#[async_trait]
pub trait AsyncRunOutputFetcher: Send + Sync {
    async fn get_run_output(&self, run_id: RunId) -> Result<RunOutput, CoreError>;
}

/// Sub-tasks whose output must be fetched, in input order.
///
/// Empty unless the run itself failed.
pub fn failed_tasks<'a>(
    run_info: &'a RunInfo,
    run_state: &RunState,
) -> impl Iterator<Item = &'a TaskRun> + 'a {
    let run_failed = run_state.is_failed();
    run_info
        .tasks
        .iter()
        .filter(move |task| run_failed && task.is_failed())
}

/// Build the record for a failed task from its fetched output.
///
/// Falls back to the run-level state message when the task output has no error.
pub fn failed_task_record(task: &TaskRun, output: RunOutput, run_state: &RunState) -> FailedTaskRecord {
    let error = output
        .error
        .unwrap_or_else(|| run_state.state_message.clone());
    FailedTaskRecord {
        task_key: task.task_key.clone(),
        run_id: task.run_id,
        error,
    }
}

/// Collect error records for the failed sub-tasks of a run.
pub fn extract_failed_task_errors<F: RunOutputFetcher + ?Sized>(
    fetcher: &F,
    run_info: &RunInfo,
    run_state: &RunState,
) -> Result<Vec<FailedTaskRecord>, CoreError> {
    let mut records = Vec::new();
    for task in failed_tasks(run_info, run_state) {
        trace!(task_key = %task.task_key, run_id = %task.run_id, "Fetching failed task output");
        let output = fetcher.get_run_output(task.run_id)?;
        records.push(failed_task_record(task, output, run_state));
    }
    debug!(failed = records.len(), "Extracted failed task errors");
    Ok(records)
}

/// Async form of [`extract_failed_task_errors`]. Outputs are fetched one after another.
pub async fn extract_failed_task_errors_async<F: AsyncRunOutputFetcher + ?Sized>(
    fetcher: &F,
    run_info: &RunInfo,
    run_state: &RunState,
) -> Result<Vec<FailedTaskRecord>, CoreError> {
    let mut records = Vec::new();
    for task in failed_tasks(run_info, run_state) {
        trace!(task_key = %task.task_key, run_id = %task.run_id, "Fetching failed task output");
        let output = fetcher.get_run_output(task.run_id).await?;
        records.push(failed_task_record(task, output, run_state));
    }
    debug!(failed = records.len(), "Extracted failed task errors");
    Ok(records)
}
