use std::collections::HashMap;

use uuid::Uuid;

pub const DELIVERY_HEADER: &str = "x-gogs-delivery";

/// Looks up a header by name, ignoring ASCII case.
pub fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
}

pub fn extract_request_id(headers: &HashMap<String, String>) -> String {
    match header_value(headers, DELIVERY_HEADER) {
        Some(delivery) if !delivery.is_empty() => format!("req-{}", delivery),
        // Gogs always sends a delivery id; anything else gets a fresh one
        _ => format!("req-{}", Uuid::new_v4()),
    }
}
