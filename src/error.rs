use std::{error::Error, fmt, io::Error as IoError};

use http::header::InvalidHeaderValue;
use http::StatusCode;
use serde_json::error::Error as JsonError;

#[derive(Debug)]
pub enum JPushError {
    /// The platform list was empty
    InvalidPlatform,
    /// The payload could not be encoded as JSON
    Serialization(JsonError),
    /// The HTTP request could not be assembled from the given parts
    RequestConstruction(String),
    /// The request never got a response: connection refused, DNS failure, timeout...
    Transport(Box<dyn Error + Send + Sync>),
    /// Anything but `200 OK`. The message is the status line and the response
    /// body (or the error met while reading it), joined with `@`. `body` holds
    /// the bytes as received, empty if reading failed.
    HttpStatus {
        status: StatusCode,
        message: String,
        body: Vec<u8>,
    },
    /// Error in reading a successful response body
    Io(IoError),
    /// Corrupted response data
    InvalidResponse,
    /// `push` was called before a payload was attached
    MissingPayload,
    /// Either a notification or a message is required
    ContentMissing,
    /// A message must carry content
    MessageContentMissing,
    /// Serialized iOS notification exceeds the provider limit
    IosNotificationTooLarge,
}

impl Error for JPushError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JPushError::Serialization(err) => Some(err),
            JPushError::Transport(err) => Some(err.as_ref()),
            JPushError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JsonError> for JPushError {
    fn from(err: JsonError) -> JPushError {
        JPushError::Serialization(err)
    }
}

impl From<http::Error> for JPushError {
    fn from(err: http::Error) -> JPushError {
        JPushError::RequestConstruction(err.to_string())
    }
}

impl From<InvalidHeaderValue> for JPushError {
    fn from(err: InvalidHeaderValue) -> JPushError {
        JPushError::RequestConstruction(err.to_string())
    }
}

impl From<ct_codecs::Error> for JPushError {
    fn from(err: ct_codecs::Error) -> JPushError {
        JPushError::RequestConstruction(format!("credential encoding failed: {:?}", err))
    }
}

#[cfg(feature = "isahc-client")]
impl From<isahc::Error> for JPushError {
    fn from(err: isahc::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<IoError> for JPushError {
    fn from(err: IoError) -> JPushError {
        JPushError::Io(err)
    }
}

impl JPushError {
    pub fn short_description(&self) -> &'static str {
        match *self {
            JPushError::InvalidPlatform => "invalid_platform",
            JPushError::Serialization(_) => "serialization_error",
            JPushError::RequestConstruction(_) => "request_construction_error",
            JPushError::Transport(_) => "transport_error",
            JPushError::HttpStatus { .. } => "http_status_error",
            JPushError::Io(_) => "io_error",
            JPushError::InvalidResponse => "invalid_response",
            JPushError::MissingPayload => "missing_payload",
            JPushError::ContentMissing => "content_missing",
            JPushError::MessageContentMissing => "message_content_missing",
            JPushError::IosNotificationTooLarge => "ios_notification_too_large",
        }
    }

    /// The raw body of a rejected request.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            JPushError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            JPushError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for JPushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JPushError::InvalidPlatform => write!(f, "<Platform>: invalid platform"),
            JPushError::Serialization(err) => write!(f, "could not serialize payload: {}", err),
            JPushError::RequestConstruction(reason) => write!(f, "could not build request: {}", reason),
            JPushError::Transport(err) => write!(f, "transport error: {}", err),
            JPushError::HttpStatus { message, .. } => write!(f, "{}", message),
            JPushError::Io(err) => write!(f, "i/o error: {}", err),
            JPushError::InvalidResponse => write!(f, "could not parse response data"),
            JPushError::MissingPayload => write!(f, "no payload attached to the client"),
            JPushError::ContentMissing => write!(f, "<PushObject>: notification or message is required"),
            JPushError::MessageContentMissing => write!(f, "<Message>: msg_content is required"),
            JPushError::IosNotificationTooLarge => write!(f, "<IosNotification>: iOS notification too large"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_error_displays_its_message_verbatim() {
        let error = JPushError::HttpStatus {
            status: StatusCode::CREATED,
            message: "201 Created@oops".into(),
            body: b"oops".to_vec(),
        };

        assert_eq!("201 Created@oops", error.to_string());
        assert_eq!(Some(StatusCode::CREATED), error.status());
        assert_eq!(Some(&b"oops"[..]), error.body());
        assert_eq!("http_status_error", error.short_description());
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let json_error = serde_json::from_str::<u8>("nope").unwrap_err();
        let error: JPushError = json_error.into();

        assert!(matches!(error, JPushError::Serialization(_)));
        assert!(error.source().is_some());
    }
}
