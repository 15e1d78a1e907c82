use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{EventKind, GogsEvent, ProcessingResult, WebhookMessage};
use crate::providers::logging::StructuredLogger;
use crate::services::event_formatter::{EventFormatter, FormatOutcome, WebhookOptions};
use crate::services::message_sink::MessageSink;
use crate::utils::error::{AppError, Result};
use crate::utils::request_id::{extract_request_id, header_value};

pub const EVENT_HEADER: &str = "x-gogs-event";

#[async_trait]
pub trait WebhookProcessorTrait {
    async fn process_webhook(
        &self,
        webhook: WebhookMessage,
        options: &WebhookOptions,
    ) -> Result<ProcessingResult>;
}

#[derive(Clone)]
pub struct WebhookProcessor {
    formatter: EventFormatter,
    sink: Arc<dyn MessageSink + Send + Sync>,
    defaults: WebhookOptions,
}

impl WebhookProcessor {
    pub fn new(config: &AppConfig, sink: Arc<dyn MessageSink + Send + Sync>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            formatter: EventFormatter::from_config(&config.integration),
            sink,
            defaults: WebhookOptions::from_config(&config.integration),
        })
    }

    /// Options taken from the application config, for callers that have no
    /// per-request overrides.
    pub fn default_options(&self) -> &WebhookOptions {
        &self.defaults
    }

    pub fn formatter(&self) -> &EventFormatter {
        &self.formatter
    }

    pub fn event_kind(webhook: &WebhookMessage) -> Result<EventKind> {
        header_value(&webhook.headers, EVENT_HEADER)
            .filter(|kind| !kind.is_empty())
            .ok_or_else(|| AppError::missing_event_header("X-Gogs-Event"))?
            .parse()
    }

    async fn handle(
        &self,
        webhook: &WebhookMessage,
        options: &WebhookOptions,
        request_id: &str,
    ) -> Result<ProcessingResult> {
        let received_at = chrono::Utc::now();
        let kind = Self::event_kind(webhook)?;
        let event = GogsEvent::parse(kind, &webhook.body)?;

        StructuredLogger::log_info(
            "Processing Gogs webhook",
            Some(request_id),
            Some(serde_json::json!({
                "event": kind.as_str(),
                "repository": event.repository().full_name,
                "body_size": webhook.body.len()
            })),
        );

        let notification = match self.formatter.format(&event, options)? {
            FormatOutcome::Emit(notification) => {
                self.sink.deliver(&notification, request_id).await?;
                Some(notification)
            }
            FormatOutcome::Filtered { branch } => {
                StructuredLogger::log_info(
                    &format!("Branch `{}` is not in the allow-list, ignoring event", branch),
                    Some(request_id),
                    None,
                );
                None
            }
            FormatOutcome::Skipped { reason } => {
                StructuredLogger::log_info(
                    &format!("Nothing to report: {}", reason),
                    Some(request_id),
                    None,
                );
                None
            }
        };

        Ok(ProcessingResult {
            request_id: request_id.to_string(),
            event: kind,
            notification,
            received_at,
        })
    }
}

#[async_trait]
impl WebhookProcessorTrait for WebhookProcessor {
    async fn process_webhook(
        &self,
        webhook: WebhookMessage,
        options: &WebhookOptions,
    ) -> Result<ProcessingResult> {
        let request_id = extract_request_id(&webhook.headers);

        match self.handle(&webhook, options, &request_id).await {
            Ok(result) => Ok(result),
            Err(e) => {
                let message = format!("Failed to process webhook {}: {}", request_id, e);
                if e.is_client_error() {
                    StructuredLogger::log_warning(&message, Some(&request_id));
                } else {
                    StructuredLogger::log_error(&message, Some(&request_id));
                }
                Err(e)
            }
        }
    }
}
