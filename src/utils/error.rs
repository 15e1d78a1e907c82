use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported event kind: {message}")]
    UnsupportedEventKind { message: String },

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("Missing event header: {header}")]
    MissingEventHeader { header: String },

    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging initialization error: {0}")]
    LoggingInit(#[from] tracing_appender::rolling::InitError),

    #[error("Logging initialization error: {message}")]
    Logging { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl AppError {
    pub fn unsupported_event_kind(message: impl Into<String>) -> Self {
        Self::UnsupportedEventKind {
            message: message.into(),
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    pub fn missing_event_header(header: impl Into<String>) -> Self {
        Self::MissingEventHeader {
            header: header.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Client errors are the sender's fault: the payload or its event kind
    /// cannot be turned into a notification.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEventKind { .. }
                | Self::MalformedPayload { .. }
                | Self::MissingEventHeader { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
