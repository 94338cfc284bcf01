//! Tracing setup
//!
//! The subscriber is installed before the config file is read, so config
//! loading can log. It starts from `RUST_LOG`, or else the command-line
//! level, or else `info`, and moves to the configured level once the config
//! file has been read. `RUST_LOG` always wins.

use anyhow::{Context, Result};
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until configuration says otherwise
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Handle to the installed log filter
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogFilter {
    /// Switch to `level` unless the filter came from `RUST_LOG`
    pub fn apply_level(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }

        let filter = EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?;
        self.handle
            .reload(filter)
            .context("Failed to update log filter")?;
        Ok(())
    }
}

/// Install the global subscriber
pub fn init_tracing(cli_level: Option<&str>) -> Result<LogFilter> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(cli_level.unwrap_or(DEFAULT_LOG_LEVEL)), false),
    };
    let (layer, log_filter) = reloadable(filter, from_env);

    tracing_subscriber::registry()
        .with(layer)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_filter)
}

fn reloadable(filter: EnvFilter, from_env: bool) -> (reload::Layer<EnvFilter, Registry>, LogFilter) {
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogFilter { handle, from_env })
}
