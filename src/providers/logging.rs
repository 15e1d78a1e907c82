use serde_json::Value;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggerConfig;
use crate::utils::error::{AppError, Result};

const DEFAULT_REQUEST_ID: &str = "MAIN";

pub struct StructuredLogger;

impl StructuredLogger {
    fn filter(level: &str) -> &'static str {
        match level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "info" => "info",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }

    /// JSON logs on stdout. With a log directory configured, ERROR records are
    /// also appended to `<dir>/<file_name>.error.log.<date>`.
    pub fn init(config: &LoggerConfig) -> Result<()> {
        let filter = EnvFilter::new(Self::filter(&config.level));

        let installed = match &config.dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let error_file = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(format!("{}.error.log", config.file_name))
                    .build(dir)?
                    .with_max_level(Level::ERROR);

                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stdout.and(error_file))
                    .try_init()
            }
            None => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .try_init(),
        };

        installed.map_err(|e| AppError::logging(e.to_string()))
    }

    pub fn log_error(error: &str, request_id: Option<&str>) {
        let request_id = request_id.unwrap_or(DEFAULT_REQUEST_ID);
        tracing::error!(request_id = request_id, "{}", error);
    }

    pub fn log_warning(message: &str, request_id: Option<&str>) {
        let request_id = request_id.unwrap_or(DEFAULT_REQUEST_ID);
        tracing::warn!(request_id = request_id, "{}", message);
    }

    pub fn log_info(message: &str, request_id: Option<&str>, additional_data: Option<Value>) {
        let request_id = request_id.unwrap_or(DEFAULT_REQUEST_ID);
        match additional_data {
            Some(data) => {
                tracing::info!(request_id = request_id, data = %data, "{}", message)
            }
            None => tracing::info!(request_id = request_id, "{}", message),
        }
    }
}
