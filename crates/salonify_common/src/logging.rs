//! Logging utilities for the Salonify application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace: one subscriber setup plus a couple of helpers for
//! logging results at call sites.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use salonify_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured; the given level applies to every
/// `salonify*` target. Calling this twice is harmless.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("salonify={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a global default subscriber may already be set (tests, doctests)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

