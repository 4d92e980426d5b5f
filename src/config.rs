//! Configuration management for the task library binary.
//!
//! Configuration can be set via environment variables:
//! - `TASKLIB_TASKS` - Required. Task directives separated by `;` or newlines.
//!   Each directive is a task name optionally followed by whitespace and its
//!   argument text, e.g. `MatchNumber 42; Echo; SortInputs size=3,direction=desc`.
//! - `TASKLIB_PRETTY` - Optional. Pretty-print the JSON report. Defaults to `true`.

use thiserror::Error;

pub const TASKS_VAR: &str = "TASKLIB_TASKS";
pub const PRETTY_VAR: &str = "TASKLIB_PRETTY";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// One task to register: a name and its (possibly empty) argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDirective {
    pub name: String,
    pub args: String,
}

impl TaskDirective {
    /// Split `Name args...` at the first run of whitespace.
    ///
    /// Returns `None` for a blank directive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (name, args) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));
        Some(Self {
            name: name.to_string(),
            args: args.trim().to_string(),
        })
    }
}

/// Binary configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tasks to register, in order
    pub tasks: Vec<TaskDirective>,

    /// Pretty-print the JSON report
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `TASKLIB_TASKS` is not set and
    /// `ConfigError::InvalidValue` if it holds no directive or
    /// `TASKLIB_PRETTY` is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(TASKS_VAR).ok_or_else(|| ConfigError::MissingEnvVar(TASKS_VAR.to_string()))?;
        let tasks = parse_directives(&raw);
        if tasks.is_empty() {
            return Err(ConfigError::InvalidValue(
                TASKS_VAR.to_string(),
                "no task directives".to_string(),
            ));
        }

        let pretty = match lookup(PRETTY_VAR) {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidValue(PRETTY_VAR.to_string(), format!("'{}' is not a boolean", value))
            })?,
            None => true,
        };

        Ok(Self { tasks, pretty })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(tasks: Vec<TaskDirective>) -> Self {
        Self { tasks, pretty: true }
    }
}

/// Split directive text on `;` and newlines, dropping blank directives.
pub fn parse_directives(text: &str) -> Vec<TaskDirective> {
    text.split(|c: char| c == ';' || c == '\n')
        .filter_map(TaskDirective::parse)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
