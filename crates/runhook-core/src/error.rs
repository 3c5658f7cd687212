//! Core domain errors.

use thiserror::Error;

/// Core domain errors for runhook.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A leaf of unsupported type was found while normalizing content.
    #[error("Type `{type_name}` used for parameter {path} is not a number or a string")]
    ContentType { type_name: String, path: String },

    /// A required key is absent from a trigger event.
    #[error("Could not find `{key}` in the event: {event}")]
    MissingField { key: String, event: String },

    /// A trigger event field is present but has the wrong shape.
    #[error("Invalid `{key}` in the event: {reason}")]
    InvalidField { key: String, reason: String },

    /// The run state carried by a trigger event could not be parsed.
    #[error("Run state returned by the Trigger is incorrect: {raw}")]
    MalformedRunState { raw: String },

    /// Fetching the output of a task run failed.
    #[error("Failed to fetch output for run {run_id}: {source}")]
    RunOutputUnavailable {
        run_id: i64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CoreError {
    /// Create a `RunOutputUnavailable` error from any fetch failure.
    pub fn run_output_unavailable(
        run_id: i64,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::RunOutputUnavailable {
            run_id,
            source: source.into(),
        }
    }

    /// Returns true if repeating the same call could succeed.
    ///
    /// Content, event and run-state errors come from the caller's input and
    /// fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RunOutputUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_message() {
        let err = CoreError::ContentType {
            type_name: "null".to_string(),
            path: "json[a][1]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type `null` used for parameter json[a][1] is not a number or a string"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_run_output_unavailable_is_retryable() {
        let err = CoreError::run_output_unavailable(42, "connection reset");
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Failed to fetch output for run 42: connection reset"
        );
    }
}
