//! Structured logging configuration.
//!
//! Log records from the `card_room` library are bridged into the same
//! subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::session::Outcome;

/// Initialize structured logging
///
/// Levels are configurable via the `RUST_LOG` env var (default `info`).
/// Output goes to stderr so it never mixes with command results.
///
/// # Example
///
/// ```no_run
/// logging::init();
/// tracing::info!("Console starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log the outcome of an operator command
///
/// # Arguments
///
/// * `command` - Raw command line
/// * `outcome` - What the engine returned
pub fn log_command(command: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Rejected { kind, message } => {
            tracing::warn!(command = command, kind = %kind, "Command rejected: {}", message);
        }
        _ => {
            tracing::debug!(command = command, "Command completed");
        }
    }
}
