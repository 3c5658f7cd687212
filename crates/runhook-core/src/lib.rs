//! runhook Core Domain Types
//!
//! This crate contains the pure logic shared by the Jobs API client and CLI:
//! - payload content normalization
//! - run state and run info types
//! - failed sub-task error extraction
//! - trigger event validation
//!
//! Nothing here performs network I/O. Output fetching is injected through
//! [`RunOutputFetcher`] and [`AsyncRunOutputFetcher`].

pub mod content;
pub mod error;
pub mod event;
pub mod extract;
pub mod ids;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use content::{normalize_content, normalize_content_at, Content, NormalizedContent};
pub use error::CoreError;
pub use event::{validate_trigger_event, TriggerEvent};
pub use extract::{
    extract_failed_task_errors, extract_failed_task_errors_async, AsyncRunOutputFetcher,
    RunOutputFetcher,
};
pub use ids::RunId;
pub use status::{RunLifeCycleState, RunState};
pub use task::{FailedTaskRecord, RunInfo, RunOutput, TaskRun, TaskRunState};
