//! Jobs API client for runhook.
//!
//! Provides an async and a blocking client for the Jobs REST API. They are the
//! two run output fetchers used by failed-task extraction.

pub mod api;
pub mod blocking;
pub mod config;
pub mod error;
pub mod http;

pub use blocking::BlockingJobsClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::JobsClient;
