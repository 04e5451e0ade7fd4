use log::{error, info, warn};
use serde_json::{json, Value};

const SERVICE: &str = "herald";

/// One JSON line per pipeline stage, so log queries can filter on `event`.
fn event_line(event: &str, key: &str, detail: &str) -> Value {
    json!({
        "service": SERVICE,
        "event": event,
        key: detail
    })
}

pub fn log_info(event: &str, message: &str) {
    info!("{}", event_line(event, "message", message));
}

pub fn log_warn(event: &str, message: &str) {
    warn!("{}", event_line(event, "message", message));
}

pub fn log_error(event: &str, error_message: &str) {
    error!("{}", event_line(event, "error", error_message));
}
