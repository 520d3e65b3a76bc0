use http::{Request, Response};
use isahc::{Body, HttpClient};

use crate::clients::HttpTransport;
use crate::error::JPushError;

/// Default [`HttpTransport`] of [`JPushClient::new`](crate::JPushClient::new), backed by
/// [`isahc`](https://crates.io/crates/isahc).
///
/// `execute` blocks the calling thread until the JPush server answers or the connection fails;
/// no async runtime is involved. Connections are kept alive in isahc's pool, shared between
/// clones, so build one transport per process and clone it into each client.
///
/// No timeout is set. Pass a configured `isahc::HttpClient` through `From` to get one.
#[derive(Clone)]
pub struct IsahcTransport {
    client: HttpClient,
}

impl From<HttpClient> for IsahcTransport {
    /// Wraps an `HttpClient` carrying custom settings such as timeouts or proxies.
    fn from(client: HttpClient) -> Self {
        Self { client }
    }
}

impl IsahcTransport {
    /// Starts an isahc client with default settings. Fails if its agent thread cannot be spawned.
    pub fn new() -> Result<Self, JPushError> {
        Ok(Self {
            client: HttpClient::new()?,
        })
    }
}

impl HttpTransport for IsahcTransport {
    type Body = Body;

    /// One blocking exchange with the provider.
    fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Body>, JPushError> {
        trace!("Request: {} {}", request.method(), request.uri());

        let response = self.client.send(request)?;

        trace!("Response: {:?}", response);

        Ok(response)
    }
}
