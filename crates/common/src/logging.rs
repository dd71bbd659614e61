// VODB - Visual Object Debugger
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for VODB components
//!
//! Provides centralized logging setup with:
//! - Colorful console output on stderr (stdout carries panel commands)
//! - Optional file logging to a temporary directory
//! - Environment variable support (RUST_LOG)
//! - Default INFO level

use eyre::Result;
use std::{env, fs, io, path::PathBuf, sync::Once};
use tracing::Level;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Initialize logging for a VODB component
///
/// This function sets up:
/// - Structured console logging with timestamps, written to stderr
/// - File logging to a temporary directory with daily rotation
/// - Environment variable support for log levels (RUST_LOG)
/// - Default INFO level if no RUST_LOG is set
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "vodb", "vodb-serve")
/// * `enable_file_logging` - Whether to also write a log file
///
/// # Examples
/// ```rust
/// use vodb_common::logging;
///
/// fn main() -> eyre::Result<()> {
///     logging::init_logging("vodb", false)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_logging(component_name: &str, enable_file_logging: bool) -> Result<()> {
    let env_filter = default_filter(Level::INFO)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(true)
        .with_writer(io::stderr);

    if enable_file_logging {
        let log_dir = create_log_directory(component_name)?;

        let file_appender = rolling::daily(&log_dir, format!("{component_name}.log"));
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        // The guard flushes on drop; logging lives for the whole process.
        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(LocalTime::rfc_3339())
            .with_ansi(false)
            .with_writer(non_blocking_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer.with_filter(filter_for_console()))
            .with(file_layer.with_filter(filter_for_file()))
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {e}"))?;

        tracing::info!(
            component = component_name,
            log_dir = %log_dir.display(),
            "Logging initialized with console and file output"
        );
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer.with_filter(filter_for_console()))
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {e}"))?;

        tracing::debug!(component = component_name, "Logging initialized with console output only");
    }

    log_environment_info(component_name);

    Ok(())
}

/// Env filter from RUST_LOG, falling back to `level`
fn default_filter(level: Level) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .map_err(|e| eyre::eyre!("Failed to create environment filter: {e}"))
}

/// Create log directory in system temp folder
fn create_log_directory(component_name: &str) -> Result<PathBuf> {
    let log_dir = env::temp_dir().join("vodb-logs").join(component_name);

    fs::create_dir_all(&log_dir)?;

    Ok(log_dir)
}

/// Filter for console output - keep websocket plumbing quiet
fn filter_for_console() -> EnvFilter {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
    ["tungstenite=warn", "tokio_tungstenite=warn", "hyper=warn", "axum=warn"]
        .into_iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}

/// Filter for file output - be more verbose for debugging
fn filter_for_file() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::DEBUG.as_str()))
}

/// Log useful environment information
fn log_environment_info(component_name: &str) {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let args: Vec<String> = env::args().collect();

    tracing::debug!(
        component = component_name,
        rust_log = %rust_log,
        args = ?args,
        "Environment information"
    );
}

/// Initialize simple logging (console only, compact formatting)
///
/// This is useful for tests or simple utilities that don't need
/// the full logging setup.
///
/// # Arguments
/// * `level` - The default log level to use
pub fn init_simple_logging(level: Level) -> Result<()> {
    let env_filter = default_filter(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {e}"))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times
///
/// Uses `std::sync::Once` so that initialization happens only once per test
/// process. Console only, INFO by default unless `default_level` or RUST_LOG
/// says otherwise.
///
/// # Usage
/// ```rust
/// use vodb_common::logging;
/// use tracing::info;
///
/// #[test]
/// fn my_test() {
///     logging::ensure_test_logging(None);
///     info!("This will work safely in any test!");
/// }
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        let default_level = default_level.unwrap_or(Level::INFO);
        // A subscriber may already be installed by the harness; that is fine.
        let _ = init_simple_logging(default_level);
    });
}
