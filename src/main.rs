use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use gogs_webhook::{
    config::{AppConfig, DEFAULT_CONFIG_FILE},
    models::WebhookMessage,
    providers::StructuredLogger,
    services::{StdoutSink, WebhookOptions, WebhookProcessor, WebhookProcessorTrait},
};

/// Formats a Gogs webhook payload into a chat notification.
#[derive(Debug, Parser)]
#[command(name = "gogs-webhook", version)]
struct Args {
    /// Value of the X-Gogs-Event header (push, create, pull_request, issues, issue_comment)
    #[arg(short, long)]
    event: String,

    /// File holding the JSON payload
    #[arg(short, long)]
    payload: PathBuf,

    /// Comma-separated branch allow-list, overrides the config
    #[arg(long)]
    branches: Option<String>,

    /// Custom topic, overrides the config
    #[arg(long)]
    topic: Option<String>,

    /// Delivery id used to correlate log records
    #[arg(long)]
    delivery: Option<String>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load_from(&args.config)?;

    StructuredLogger::init(&config.logger)?;

    let body = tokio::fs::read_to_string(&args.payload)
        .await
        .with_context(|| format!("failed to read payload {}", args.payload.display()))?;

    let mut headers = HashMap::new();
    headers.insert("x-gogs-event".to_string(), args.event.clone());
    if let Some(delivery) = &args.delivery {
        headers.insert("x-gogs-delivery".to_string(), delivery.clone());
    }

    let options = WebhookOptions::new(
        args.branches.as_deref().or(config.integration.branches.as_deref()),
        args.topic.as_deref().or(config.integration.topic.as_deref()),
    );

    let processor = WebhookProcessor::new(&config, Arc::new(StdoutSink))?;
    let result = processor
        .process_webhook(WebhookMessage { headers, body }, &options)
        .await?;

    if !result.delivered() {
        StructuredLogger::log_info(
            "Event produced no notification",
            Some(&result.request_id),
            Some(serde_json::json!({ "event": result.event.as_str() })),
        );
    }

    Ok(())
}
