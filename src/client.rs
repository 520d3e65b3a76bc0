use std::fmt;

use http::{HeaderMap, Method};

use crate::clients::{request_builder, HttpTransport, RawResponse};
use crate::config;
use crate::device::DeviceUpdate;
use crate::error::JPushError;
use crate::payload::Payload;
use crate::response::{PushResult, QueryDeviceResult};

#[cfg(feature = "isahc-client")]
use crate::clients::isahc_client::IsahcTransport;

/// Sends pushes for one app, authenticated with its app key and master secret.
///
/// The client holds at most one payload. Attaching a new one replaces the previous,
/// so a `set_payload` followed by `push` must not be interleaved with other threads
/// using the same client.
///
/// ```no_run
/// # use jpush_api::*;
/// let mut client = JPushClient::new("app-key", "master-secret").unwrap();
///
/// let mut payload = Payload::new(Platform::All, Audience::All);
/// payload.set_notification(Notification::new("Hello!"));
/// client.set_payload(payload);
///
/// let response = client.push().unwrap();
/// println!("{}", String::from_utf8_lossy(&response));
/// ```
pub struct JPushClient<T> {
    app_key: String,
    headers: HeaderMap,
    payload: Option<Payload>,
    transport: T,
}

impl<T> fmt::Debug for JPushClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JPushClient")
            .field("app_key", &self.app_key)
            .field("payload", &self.payload)
            .finish()
    }
}

#[cfg(feature = "isahc-client")]
impl JPushClient<IsahcTransport> {
    /// Creates a client sending through a fresh isahc transport.
    pub fn new(app_key: impl Into<String>, master_secret: impl Into<String>) -> Result<Self, JPushError> {
        Self::with_transport(app_key, master_secret, IsahcTransport::new()?)
    }
}

impl<T: HttpTransport> JPushClient<T> {
    pub fn with_transport(
        app_key: impl Into<String>,
        master_secret: impl Into<String>,
        transport: T,
    ) -> Result<Self, JPushError> {
        let app_key = app_key.into();
        let master_secret: String = master_secret.into();
        let headers = request_builder::default_headers(&app_key, &master_secret, &config::get().user_agent)?;

        Ok(JPushClient {
            app_key,
            headers,
            payload: None,
            transport,
        })
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// The headers sent with every request, `Authorization` included.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Attaches the payload for the next push, dropping any previous one.
    pub fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(payload);
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn take_payload(&mut self) -> Option<Payload> {
        self.payload.take()
    }

    /// Posts the attached payload and returns the response body as received.
    pub fn push(&self) -> Result<Vec<u8>, JPushError> {
        Ok(self.send_payload()?.body)
    }

    /// Posts the attached payload and decodes the response.
    ///
    /// A push the provider rejects with its usual error document comes back as a
    /// `PushResult` whose outcome is [`PushOutcome::Rejected`](crate::PushOutcome::Rejected).
    /// Other failures, including rejections with an unreadable body, stay errors.
    pub fn push_result(&self) -> Result<PushResult, JPushError> {
        let raw = match self.send_payload() {
            Ok(raw) => raw,
            Err(JPushError::HttpStatus { status, message, body }) => {
                return match PushResult::from_slice(&body) {
                    Ok(mut result) if result.base.error.is_some() => {
                        result.base.status_code = status.as_u16();
                        Ok(result)
                    }
                    _ => Err(JPushError::HttpStatus { status, message, body }),
                };
            }
            Err(err) => return Err(err),
        };

        let mut result = PushResult::from_slice(&raw.body)?;

        result.base.status_code = raw.status.as_u16();
        result.base.rate_limit = raw.rate_limit;

        Ok(result)
    }

    /// Changes the tags, alias or mobile number of one device. Returns the
    /// response body as received.
    pub fn update_device(&self, registration_id: &str, update: &DeviceUpdate) -> Result<Vec<u8>, JPushError> {
        let body = serde_json::to_vec(update)?;
        let uri = config::get().device_endpoint(registration_id);

        Ok(self.send(Method::POST, &uri, body)?.body)
    }

    /// Fetches the tags, alias and mobile number of one device.
    pub fn query_device(&self, registration_id: &str) -> Result<QueryDeviceResult, JPushError> {
        let uri = config::get().device_endpoint(registration_id);

        let raw = self.send(Method::GET, &uri, Vec::new())?;
        let mut result = QueryDeviceResult::from_slice(&raw.body)?;

        result.base.status_code = raw.status.as_u16();
        result.base.rate_limit = raw.rate_limit;

        Ok(result)
    }

    fn send_payload(&self) -> Result<RawResponse, JPushError> {
        let payload = self.payload.as_ref().ok_or(JPushError::MissingPayload)?;
        let body = payload.to_vec()?;

        trace!("Payload: {:?}", std::str::from_utf8(&body));

        self.send(Method::POST, &config::get().push_url, body)
    }

    fn send(&self, method: Method, uri: &str, body: Vec<u8>) -> Result<RawResponse, JPushError> {
        let request = request_builder::build_request(method, uri, &self.headers, body)?;

        debug!("Sending {} {}", request.method(), request.uri());

        let response = self.transport.execute(request)?;

        request_builder::parse_response(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use http::header::AUTHORIZATION;
    use http::{HeaderValue, Request, Response, StatusCode};
    use serde_json::{json, Value};

    use super::*;
    use crate::audience::Audience;
    use crate::message::Message;
    use crate::platform::Platform;
    use crate::response::{MsgId, PushOutcome, RateLimitInfo};

    /// Answers every request with a canned response and keeps the last request.
    struct MockTransport {
        status: StatusCode,
        headers: Vec<(&'static str, &'static str)>,
        body: Vec<u8>,
        last_request: RefCell<Option<Request<Vec<u8>>>>,
    }

    impl MockTransport {
        fn new(status: StatusCode, body: &str) -> Self {
            MockTransport {
                status,
                headers: Vec::new(),
                body: body.as_bytes().to_vec(),
                last_request: RefCell::new(None),
            }
        }

        fn sent_json(&self) -> Value {
            let request = self.last_request.borrow();
            serde_json::from_slice(request.as_ref().unwrap().body()).unwrap()
        }
    }

    impl HttpTransport for MockTransport {
        type Body = Cursor<Vec<u8>>;

        fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Self::Body>, JPushError> {
            *self.last_request.borrow_mut() = Some(request);

            let mut builder = Response::builder().status(self.status);
            for (name, value) in self.headers.iter() {
                builder = builder.header(*name, *value);
            }

            Ok(builder.body(Cursor::new(self.body.clone()))?)
        }
    }

    struct UnreachableTransport;

    impl HttpTransport for UnreachableTransport {
        type Body = Cursor<Vec<u8>>;

        fn execute(&self, _: Request<Vec<u8>>) -> Result<Response<Self::Body>, JPushError> {
            Err(JPushError::Transport("connection refused".into()))
        }
    }

    fn hello_payload() -> Payload {
        let mut payload = Payload::new(Platform::All, Audience::All);
        payload.set_message(Message::new("hello"));
        payload
    }

    #[test]
    fn signs_requests_with_basic_auth() {
        let client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, "{}")).unwrap();

        assert_eq!(
            HeaderValue::from_static("Basic azpz"),
            client.headers()[AUTHORIZATION]
        );
        assert_eq!("k", client.app_key());
    }

    #[test]
    fn the_master_secret_stays_out_of_debug_output() {
        let client =
            JPushClient::with_transport("k", "very-secret", MockTransport::new(StatusCode::OK, "{}")).unwrap();

        assert!(!format!("{:?}", client).contains("very-secret"));
    }

    #[test]
    fn posts_the_attached_payload() {
        let body = r#"{"msg_id":"123456","sendno":"0"}"#;
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, body)).unwrap();
        client.set_payload(hello_payload());

        let response = client.push().unwrap();

        assert_eq!(body.as_bytes(), response.as_slice());
        assert_eq!(
            json!({"platform": "all", "audience": "all", "message": {"msg_content": "hello"}}),
            client.transport.sent_json()
        );

        let request = client.transport.last_request.borrow();
        let request = request.as_ref().unwrap();
        assert_eq!(Method::POST, request.method());
        assert_eq!(config::get().push_url, request.uri().to_string());
        assert_eq!("Basic azpz", request.headers()[AUTHORIZATION]);
        assert_eq!("application/json", request.headers()["content-type"]);
    }

    #[test]
    fn a_new_payload_replaces_the_previous_one() {
        let mut client =
            JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, r#"{"msg_id":"1"}"#)).unwrap();
        client.set_payload(hello_payload());

        let mut second = Payload::new(Platform::All, Audience::All);
        second.set_message(Message::new("second"));
        client.set_payload(second);
        client.push().unwrap();

        assert_eq!(json!({"msg_content": "second"}), client.transport.sent_json()["message"]);
    }

    #[test]
    fn pushing_without_payload_fails() {
        let client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, "{}")).unwrap();

        assert!(matches!(client.push(), Err(JPushError::MissingPayload)));
        assert!(client.transport.last_request.borrow().is_none());
    }

    #[test]
    fn an_empty_push_is_sent_as_is() {
        let mut client =
            JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, r#"{"msg_id":"1"}"#)).unwrap();
        client.set_payload(Payload::new(Platform::All, Audience::All));

        client.push().unwrap();

        assert_eq!(json!({"platform": "all", "audience": "all"}), client.transport.sent_json());
    }

    #[test]
    fn non_200_responses_carry_status_and_body() {
        let body = r#"{"error":{"code":1011,"message":"bad"}}"#;
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::CREATED, body)).unwrap();
        client.set_payload(hello_payload());

        let error = client.push().unwrap_err();

        assert_eq!(Some(StatusCode::CREATED), error.status());
        assert!(error.to_string().contains("201 Created"));
        assert!(error.to_string().contains(body));
    }

    #[test]
    fn transport_failures_are_returned() {
        let mut client = JPushClient::with_transport("k", "s", UnreachableTransport).unwrap();
        client.set_payload(hello_payload());

        let error = client.push().unwrap_err();

        assert!(matches!(error, JPushError::Transport(_)));
        assert_eq!("transport error: connection refused", error.to_string());
    }

    #[test]
    fn push_result_fills_status_and_rate_limit() {
        let mut transport = MockTransport::new(StatusCode::OK, r#"{"msg_id":"123456","sendno":"7"}"#);
        transport.headers = vec![
            ("X-Rate-Limit-Limit", "600"),
            ("X-Rate-Limit-Remaining", "42"),
            ("X-Rate-Limit-Reset", "30"),
        ];
        let mut client = JPushClient::with_transport("k", "s", transport).unwrap();
        client.set_payload(hello_payload());

        let result = client.push_result().unwrap();

        assert_eq!(200, result.base.status_code);
        assert_eq!(
            Some(RateLimitInfo {
                quota: 600,
                remaining: 42,
                reset: 30
            }),
            result.base.rate_limit
        );
        assert_eq!(Some("7".to_string()), result.sendno);
        assert_eq!(
            PushOutcome::Accepted {
                msg_id: &MsgId::Text("123456".into())
            },
            result.outcome()
        );
    }

    #[test]
    fn push_result_decodes_a_rejected_push() {
        let body = r#"{"error":{"code":1011,"message":"cannot find user"},"msg_id":1234567}"#;
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::BAD_REQUEST, body)).unwrap();
        client.set_payload(hello_payload());

        let result = client.push_result().unwrap();

        assert_eq!(400, result.base.status_code);
        assert!(!result.is_success());
        match result.outcome() {
            PushOutcome::Rejected { error, msg_id } => {
                assert_eq!(1011, error.code);
                assert_eq!("cannot find user", error.message);
                assert_eq!(&MsgId::Number(1_234_567), msg_id);
            }
            outcome => panic!("unexpected outcome {:?}", outcome),
        }
    }

    #[test]
    fn push_result_keeps_undecodable_rejections_as_errors() {
        let body = "<html>Bad Gateway</html>";
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::BAD_GATEWAY, body)).unwrap();
        client.set_payload(hello_payload());

        let error = client.push_result().unwrap_err();

        assert_eq!(Some(StatusCode::BAD_GATEWAY), error.status());
        assert_eq!(Some(body.as_bytes()), error.body());
        assert_eq!("502 Bad Gateway@<html>Bad Gateway</html>", error.to_string());
    }

    #[test]
    fn push_still_fails_on_a_rejected_push() {
        let body = r#"{"error":{"code":1011,"message":"cannot find user"},"msg_id":1234567}"#;
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::BAD_REQUEST, body)).unwrap();
        client.set_payload(hello_payload());

        let error = client.push().unwrap_err();

        assert_eq!(Some(body.as_bytes()), error.body());
    }

    #[test]
    fn push_result_rejects_garbage() {
        let mut client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, "oops")).unwrap();
        client.set_payload(hello_payload());

        assert!(matches!(client.push_result(), Err(JPushError::InvalidResponse)));
    }

    #[test]
    fn updates_a_device() {
        let client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, "")).unwrap();
        let mut update = DeviceUpdate::new();
        update.add_tags(["vip"]);
        update.set_mobile("13800138000");

        let response = client.update_device("0900e8d85ef", &update).unwrap();

        assert!(response.is_empty());
        assert_eq!(
            json!({"tags": {"add": ["vip"]}, "mobile": "13800138000"}),
            client.transport.sent_json()
        );

        let request = client.transport.last_request.borrow();
        let request = request.as_ref().unwrap();
        assert_eq!(Method::POST, request.method());
        assert_eq!(
            config::get().device_endpoint("0900e8d85ef"),
            request.uri().to_string()
        );
    }

    #[test]
    fn queries_a_device() {
        let body = r#"{"tags":["vip"],"alias":"alice","mobile":null}"#;
        let client = JPushClient::with_transport("k", "s", MockTransport::new(StatusCode::OK, body)).unwrap();

        let result = client.query_device("0900e8d85ef").unwrap();

        assert_eq!(vec!["vip".to_string()], result.tags);
        assert_eq!(Some("alice".to_string()), result.alias);
        assert_eq!(200, result.base.status_code);

        let request = client.transport.last_request.borrow();
        assert_eq!(Method::GET, request.as_ref().unwrap().method());
    }
}
