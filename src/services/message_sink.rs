use async_trait::async_trait;
use std::io::Write;

use crate::models::Notification;
use crate::providers::StructuredLogger;
use crate::utils::error::{AppError, Result};

/// Delivery collaborator: sends `message` to the configured destination under
/// `topic`.
#[async_trait]
pub trait MessageSink {
    async fn deliver(&self, notification: &Notification, request_id: &str) -> Result<()>;
}

/// Writes each notification to stdout as one JSON line.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

#[async_trait]
impl MessageSink for StdoutSink {
    async fn deliver(&self, notification: &Notification, request_id: &str) -> Result<()> {
        let line = serde_json::to_string(notification)?;
        {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", line)
                .map_err(|e| AppError::delivery(format!("failed to write notification: {}", e)))?;
        }

        StructuredLogger::log_info(
            "Notification written to stdout",
            Some(request_id),
            Some(serde_json::json!({ "topic": notification.topic })),
        );
        Ok(())
    }
}

/// Only records notifications in the log. Useful for dry runs.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    async fn deliver(&self, notification: &Notification, request_id: &str) -> Result<()> {
        StructuredLogger::log_info(
            "Notification ready for delivery",
            Some(request_id),
            Some(serde_json::json!({
                "topic": notification.topic,
                "message": notification.message
            })),
        );
        Ok(())
    }
}
