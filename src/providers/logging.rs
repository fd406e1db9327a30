use std::sync::OnceLock;

use serde_json::Value;
use tracing::Level;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::LoggerConfig;
use crate::utils::error::Result;

pub struct StructuredLogger;

static INITIALIZED: OnceLock<()> = OnceLock::new();

impl StructuredLogger {
    /// Installs the global JSON subscriber. With a logger config, WARN and
    /// ERROR events are also appended to a daily-rotated file.
    ///
    /// Calling this more than once is a no-op.
    pub fn init(level: &str, logger_config: Option<LoggerConfig>) -> Result<()> {
        if INITIALIZED.get().is_some() {
            return Ok(());
        }

        let filter = Self::level_filter(level);

        let installed = if let Some(config) = logger_config {
            std::fs::create_dir_all(&config.dir)?;

            let file_appender = Builder::new()
                .rotation(Rotation::DAILY)
                .filename_prefix(config.file_name.clone())
                .filename_suffix("log")
                .max_log_files(config.max_log_files.max(1))
                .build(&config.dir)?;

            let warn_file_writer = file_appender.with_max_level(Level::WARN);

            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stdout.and(warn_file_writer))
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .try_init()
        };

        // A subscriber installed elsewhere (test harness, embedding binary) wins.
        if installed.is_err() {
            tracing::debug!("global subscriber already installed, keeping it");
        }

        let _ = INITIALIZED.set(());
        Ok(())
    }

    /// Maps a configured level name to an env-filter directive. Unknown
    /// names fall back to `info`.
    pub fn level_filter(level: &str) -> &'static str {
        match level.to_lowercase().as_str() {
            "error" => "error",
            "warn" | "warning" => "warn",
            "info" => "info",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }

    pub fn log_info(
        message: &str,
        unique_id: Option<&str>,
        request_id: Option<&str>,
        additional_data: Option<Value>,
    ) {
        let (unique_id, request_id) = context(unique_id, request_id);
        match additional_data {
            Some(data) => tracing::info!(
                unique_id,
                x_request_id = request_id,
                data = %data,
                "{}",
                message
            ),
            None => tracing::info!(unique_id, x_request_id = request_id, "{}", message),
        }
    }

    pub fn log_warning(message: &str, unique_id: Option<&str>, request_id: Option<&str>) {
        let (unique_id, request_id) = context(unique_id, request_id);
        tracing::warn!(unique_id, x_request_id = request_id, "{}", message);
    }

    pub fn log_error(error: &str, unique_id: Option<&str>, request_id: Option<&str>) {
        let (unique_id, request_id) = context(unique_id, request_id);
        tracing::error!(unique_id, x_request_id = request_id, "{}", error);
    }
}

fn context<'a>(unique_id: Option<&'a str>, request_id: Option<&'a str>) -> (&'a str, &'a str) {
    let unique_id = unique_id.unwrap_or("MAIN");
    let request_id = request_id.unwrap_or(unique_id);
    (unique_id, request_id)
}
