use serde_json::{Map, Value};

/// Free-form key/value data passed through to the app untouched.
pub type Extras = Map<String, Value>;

/// A custom in-app message. Not displayed by the system, the app receives it
/// and decides what to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Required by the provider. Nothing checks it before sending, see
    /// [`Payload::validate`](crate::Payload::validate).
    #[serde(rename = "msg_content")]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extras: Option<Extras>,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Message {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    /// Sets the extras. A second call replaces the map from the first one,
    /// the two are never merged.
    pub fn add_extra(&mut self, extras: Extras) {
        self.extras = Some(extras);
    }
}

/// Text message sent over SMS when the push cannot be delivered in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub content: String,
    /// Seconds to wait for the push to arrive before falling back to SMS.
    #[serde(skip_serializing_if = "crate::options::is_zero", default)]
    pub delay_time: u32,
}

impl SmsMessage {
    pub fn new(content: impl Into<String>) -> Self {
        SmsMessage {
            content: content.into(),
            delay_time: 0,
        }
    }
}
