use serde_json::Value;

pub const INSERT_EVENT: &str = "INSERT";

/// Reads the declared event type without committing to the full envelope shape.
pub fn declared_event_type(body: &Value) -> &str {
    body.get("type").and_then(Value::as_str).unwrap_or_default()
}

/// The parts of an inserted `notifications` row the dispatcher reads.
///
/// Nothing is validated here: other columns are never read, and a bad recipient
/// or title surfaces downstream at lookup or send time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationRecord {
    pub recipient_id: String,
    pub title: Option<Value>,
    pub body: Option<Value>,
}

impl NotificationRecord {
    pub fn from_event(event: &Value) -> Self {
        let record = event.get("record").unwrap_or(&Value::Null);
        Self {
            recipient_id: record.get("user_id").map(id_text).unwrap_or_default(),
            title: record.get("title").cloned(),
            body: record.get("body").cloned(),
        }
    }
}

// Numeric keys are looked up by their decimal text
fn id_text(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
