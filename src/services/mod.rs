pub mod branch_filter;
pub mod event_formatter;
pub mod git_messages;
pub mod message_sink;
pub mod webhook_processor;

pub use branch_filter::BranchFilter;
pub use event_formatter::{EventFormatter, FormatOutcome, WebhookOptions};
pub use message_sink::{LogSink, MessageSink, StdoutSink};
pub use webhook_processor::{WebhookProcessor, WebhookProcessorTrait};
