//! Functions used to send and consume JPush http messages.
//! This module can be used to build custom transports.

use std::io::Read;

use ct_codecs::{Base64, Encoder};
use http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONNECTION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, Method, Request, Response, StatusCode};

use crate::clients::RawResponse;
use crate::config::{CHARSET, CONNECTION_ALIVE, CONTENT_TYPE_JSON};
use crate::error::JPushError;
use crate::response::RateLimitInfo;

pub const CHARSET_HEADER: &str = "charset";

/// `Basic ` followed by the standard base64 of `username:password`.
pub fn basic_auth(username: &str, password: &str) -> Result<String, JPushError> {
    let credentials = format!("{}:{}", username, password);

    Ok(format!("Basic {}", Base64::encode_to_string(credentials)?))
}

/// The headers sent with every request of a client.
pub fn default_headers(app_key: &str, master_secret: &str, user_agent: &str) -> Result<HeaderMap, JPushError> {
    let mut headers = HeaderMap::new();

    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
    headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_ALIVE));
    headers.insert(HeaderName::from_static(CHARSET_HEADER), HeaderValue::from_static(CHARSET));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

    let mut authorization = HeaderValue::from_str(&basic_auth(app_key, master_secret)?)?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}

/// Builds the request to send to the provider.
///
/// This function is generic over the request body, so transports with different body types can
/// share it.
///
/// # Example
///
/// ```
/// # use http::Method;
/// # use jpush_api::request_builder::{build_request, default_headers};
/// let headers = default_headers("key", "secret", "my-agent").unwrap();
/// let request = build_request::<Vec<u8>>(Method::POST, "https://api.jpush.cn/v3/push", &headers, b"{}".to_vec()).unwrap();
///
/// assert_eq!(Method::POST, request.method());
/// assert_eq!("application/json", request.headers()["content-type"]);
/// ```
pub fn build_request<T>(method: Method, uri: &str, headers: &HeaderMap, body: Vec<u8>) -> Result<Request<T>, JPushError>
where
    T: From<Vec<u8>>,
{
    let mut builder = Request::builder().method(method).uri(uri);

    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }

    Ok(builder.body(body.into())?)
}

/// `200 OK` style status line.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_str(), reason),
        None => status.as_str().to_string(),
    }
}

/// Reads the response, and will return `Err` unless the status is exactly `200 OK`.
///
/// The error of a rejected request carries the raw body, and a message made of the status line
/// and the body text joined with `@`. Should the body fail to read, the read error is reported
/// in place of the text.
pub fn parse_response<R: Read>(response: Response<R>) -> Result<RawResponse, JPushError> {
    let (parts, mut body) = response.into_parts();
    let status = parts.status;

    trace!("Response status: {}", status);

    let rate_limit = RateLimitInfo::from_headers(&parts.headers);
    if let Some(ref rate_limit) = rate_limit {
        debug!(
            "Rate limit: {}/{} remaining, resets in {}s",
            rate_limit.remaining, rate_limit.quota, rate_limit.reset
        );
    }

    let mut bytes = Vec::new();

    if status != StatusCode::OK {
        let message = match body.read_to_end(&mut bytes) {
            Ok(_) => format!("{}@{}", status_line(status), String::from_utf8_lossy(&bytes)),
            Err(err) => {
                bytes.clear();
                format!("{}@{}", status_line(status), err)
            }
        };

        debug!("Request rejected: {}", message);

        return Err(JPushError::HttpStatus {
            status,
            message,
            body: bytes,
        });
    }

    body.read_to_end(&mut bytes)?;

    trace!("Body text: {:?}", std::str::from_utf8(&bytes));

    Ok(RawResponse {
        status,
        headers: parts.headers,
        rate_limit,
        body: bytes,
    })
}
