use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A chat message as it travels over the relay.
///
/// The wire format carries no identifier: two messages with the same author and
/// text are indistinguishable. Broadcasts from other clients may omit the
/// author or send it as a non-string; the text is still shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    pub message: String,
}

impl ChatMessage {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Missing or null author becomes empty; other JSON values keep their text form.
fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(name) => name,
        other => other.to_string(),
    })
}
