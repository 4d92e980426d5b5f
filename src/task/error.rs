//! Registration errors.
//!
//! Both kinds are detected while the registry is being configured. Scoring
//! itself never fails: every routine is total over a context that provides
//! the data its entry requires.

/// Failure to register a task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    #[error("Unknown task name: {0}")]
    UnknownTaskName(String),

    #[error("Invalid argument for task '{task}': {source}")]
    InvalidTaskArgument {
        task: String,
        #[source]
        source: ArgError,
    },
}

impl TaskError {
    /// Wrap an argument parse failure for the named task.
    pub fn invalid_argument(task: impl Into<String>, source: ArgError) -> Self {
        Self::InvalidTaskArgument {
            task: task.into(),
            source,
        }
    }
}

/// Failure to parse a family's argument text into its parameter block.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("unknown argument '{0}'")]
    UnknownKey(String),

    #[error("argument '{0}' given more than once")]
    Duplicate(String),

    #[error("too many positional arguments (expected at most {expected})")]
    TooManyPositional { expected: usize },

    #[error("missing required argument '{0}'")]
    Missing(String),

    #[error("argument '{key}' expects a number, got '{value}'")]
    NotNumeric { key: String, value: String },

    #[error("argument '{key}' out of range: {reason}")]
    OutOfRange { key: String, reason: String },

    #[error("malformed pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("malformed argument token '{0}'")]
    MalformedToken(String),
}

impl ArgError {
    pub(crate) fn out_of_range(key: &str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display_names_task() {
        let err = TaskError::invalid_argument("MatchNumber", ArgError::Missing("target".into()));
        let text = err.to_string();
        assert!(text.contains("MatchNumber"));
        assert!(text.contains("target"));
    }

    #[test]
    fn test_invalid_argument_exposes_source() {
        use std::error::Error;

        let err = TaskError::invalid_argument(
            "Mult",
            ArgError::NotNumeric {
                key: "threshold".into(),
                value: "abc".into(),
            },
        );
        assert!(err.source().is_some());
    }
}
