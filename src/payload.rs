use crate::audience::Audience;
use crate::error::JPushError;
use crate::message::{Message, SmsMessage};
use crate::notification::Notification;
use crate::options::Options;
use crate::platform::Platform;

/// Provider limit for the serialized `ios` notification object.
pub const IOS_NOTIFICATION_MAX_BYTES: usize = 2000;

/// The JSON document describing one push.
///
/// ```
/// # use jpush_api::*;
/// let mut payload = Payload::new(Platform::All, Audience::All);
/// payload.set_message(Message::new("hello"));
///
/// let json = serde_json::to_string(&payload).unwrap();
/// assert_eq!(r#"{"platform":"all","audience":"all","message":{"msg_content":"hello"}}"#, json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload {
    pub platform: Platform,
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_message: Option<SmsMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl Payload {
    pub fn new(platform: Platform, audience: Audience) -> Self {
        Payload {
            platform,
            audience,
            ..Default::default()
        }
    }

    pub fn set_notification(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub fn set_message(&mut self, message: Message) {
        self.message = Some(message);
    }

    pub fn set_sms_message(&mut self, sms_message: SmsMessage) {
        self.sms_message = Some(sms_message);
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = Some(options);
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, JPushError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Checks what the provider would reject anyway. Sending does not call
    /// this, an invalid payload is posted as is.
    pub fn validate(&self) -> Result<(), JPushError> {
        if self.notification.is_none() && self.message.is_none() {
            return Err(JPushError::ContentMissing);
        }

        if let Some(ref message) = self.message {
            if message.content.is_empty() {
                return Err(JPushError::MessageContentMissing);
            }
        }

        if let Some(ios) = self.notification.as_ref().and_then(|n| n.ios.as_ref()) {
            if serde_json::to_vec(ios)?.len() > IOS_NOTIFICATION_MAX_BYTES {
                return Err(JPushError::IosNotificationTooLarge);
            }
        }

        Ok(())
    }
}
