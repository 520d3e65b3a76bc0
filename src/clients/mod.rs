//! Contains the HTTP transports pushes are sent through.
//!
//! [`request_builder`] contains the functions used to build requests and classify responses.
//! A transport only has to move a [`http::Request`] over the network and hand back the
//! [`http::Response`]; everything else is shared.

use std::io::Read;

use http::{HeaderMap, Request, Response, StatusCode};

use crate::error::JPushError;
use crate::response::RateLimitInfo;

pub mod request_builder;

#[cfg(feature = "isahc-client")]
pub mod isahc_client;

/// Executes one blocking HTTP exchange. Implement this to swap the HTTP stack, or to
/// answer requests from memory in tests.
pub trait HttpTransport {
    /// The response body, read once the status is known.
    type Body: Read;

    /// Sends the request. Errors here mean no response was received.
    fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Self::Body>, JPushError>;
}

/// A `200 OK` response, fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub rate_limit: Option<RateLimitInfo>,
    pub body: Vec<u8>,
}
