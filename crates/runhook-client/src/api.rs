//! Jobs API endpoints and wire types.

use runhook_core::RunId;
use serde::Deserialize;

/// Run details.
pub const RUNS_GET: &str = "/api/2.1/jobs/runs/get";

/// Output of a single task run.
pub const RUNS_GET_OUTPUT: &str = "/api/2.1/jobs/runs/get-output";

/// One-time run submission.
pub const RUNS_SUBMIT: &str = "/api/2.1/jobs/runs/submit";

/// Response body of `runs/submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRunResponse {
    pub run_id: RunId,
}
