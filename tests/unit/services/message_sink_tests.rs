use gogs_webhook::models::Notification;
use gogs_webhook::services::{LogSink, MessageSink, StdoutSink};

fn notification() -> Notification {
    Notification::new(
        "try-git / my_feature",
        "john created [my_feature](http://localhost:3000/john/try-git/src/my_feature) branch.",
    )
}

#[test]
fn test_stdout_sink_delivers() {
    let result = tokio_test::block_on(StdoutSink.deliver(&notification(), "req-stdout"));
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_log_sink_delivers() {
    let sink = LogSink;
    assert!(sink.deliver(&notification(), "req-log").await.is_ok());
}

#[test]
fn test_notification_serializes_topic_and_message() {
    let value = serde_json::to_value(notification()).unwrap();

    assert_eq!(value["topic"], "try-git / my_feature");
    assert!(value["message"].as_str().unwrap().starts_with("john created"));
}
