//! Structured event definitions for logging.
//!
//! Every event carries the run id of the invocation and the stage it was
//! emitted from, so JSONL output can be grouped per run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log levels for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Stages of one CLI invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Reading and validating the problem file.
    Load,
    /// Expectations, previsions and criteria.
    Evaluate,
    /// Rendering output.
    Report,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Evaluate => "evaluate",
            Stage::Report => "report",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    pub const PROBLEM_LOADED: &str = "problem.loaded";
    pub const PROBLEM_INVALID: &str = "problem.invalid";

    pub const EVALUATE_STARTED: &str = "evaluate.started";
    pub const EVALUATE_FINISHED: &str = "evaluate.finished";

    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// A structured log event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: Level,
    /// Event name from [`event_names`].
    pub event: String,
    pub run_id: String,
    pub stage: Stage,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEvent {
    pub fn new(
        level: Level,
        event: impl Into<String>,
        run_id: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        LogEvent {
            ts: Utc::now(),
            level,
            event: event.into(),
            run_id: run_id.into(),
            stage,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach a field. Values that fail to serialize are dropped.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }

    /// Forward the event to the active `tracing` subscriber.
    pub fn emit(&self) {
        let fields = serde_json::to_string(&self.fields).unwrap_or_default();
        match self.level {
            Level::Trace => tracing::trace!(event = %self.event, run_id = %self.run_id, stage = %self.stage, fields = %fields, "{}", self.message),
            Level::Debug => tracing::debug!(event = %self.event, run_id = %self.run_id, stage = %self.stage, fields = %fields, "{}", self.message),
            Level::Info => tracing::info!(event = %self.event, run_id = %self.run_id, stage = %self.stage, fields = %fields, "{}", self.message),
            Level::Warn => tracing::warn!(event = %self.event, run_id = %self.run_id, stage = %self.stage, fields = %fields, "{}", self.message),
            Level::Error => tracing::error!(event = %self.event, run_id = %self.run_id, stage = %self.stage, fields = %fields, "{}", self.message),
        }
    }
}

/// Shared run id for every event of one invocation.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
        }
    }

    pub fn event(
        &self,
        level: Level,
        event: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> LogEvent {
        LogEvent::new(level, event, &self.run_id, stage, message)
    }

    pub fn info(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Info, event, stage, message)
    }

    pub fn debug(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Debug, event, stage, message)
    }

    pub fn warn(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Warn, event, stage, message)
    }

    pub fn error(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Error, event, stage, message)
    }
}
