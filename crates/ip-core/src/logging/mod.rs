//! Structured logging for the improb CLI.
//!
//! - Human-readable output for interactive use
//! - JSONL for scripted runs
//!
//! stdout is reserved for command payloads; all logs go to stderr.
//!
//! ```ignore
//! use ip_core::logging::{init_logging, event_names, LogConfig, LogContext, Stage};
//!
//! let config = LogConfig::from_env(None, None);
//! init_logging(&config);
//!
//! let ctx = LogContext::new(generate_run_id());
//! ctx.info(event_names::RUN_STARTED, Stage::Init, "starting").emit();
//! ```

pub mod config;
pub mod events;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, Level, LogContext, LogEvent, Stage};

use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.level).into())
        .parse_lossy(format!("ip_core={},ip_config={}", config.level, config.level));

    let result = match config.format {
        LogFormat::Human => {
            let builder = fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                builder.try_init()
            } else {
                builder.without_time().try_init()
            }
        }
        LogFormat::Jsonl => fmt()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    // Tests and embedders may already have a subscriber installed.
    let _ = result;
}

/// Unique id for one invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("run-{}", &uuid.simple().to_string()[..12])
}
