//! One-shot HTTPS requests by method.
//!
//! # Design
//! `RequestShim` holds only a transport and carries no state between calls.
//! `request` connects once, sends once and returns the transport's response
//! or error exactly as produced. `get`, `post` and `put` fix the method and
//! forward everything else.
//!
//! Headers are an immutable slice borrowed for the duration of the call, so
//! there is no default header collection for one call to leak into the next.

use crate::http::{Method, Request};
use crate::transport::{Connection, HttpsTransport, Transport};

/// Response type produced by a transport's connections.
pub type ResponseOf<T> = <<T as Transport>::Connection as Connection>::Response;

/// Error type produced by a transport's connections.
pub type ErrorOf<T> = <<T as Transport>::Connection as Connection>::Error;

/// Synchronous request shim over a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct RequestShim<T = HttpsTransport> {
    transport: T,
}

impl<T: Transport> RequestShim<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one round trip on a fresh connection to `host`.
    pub fn request(
        &self,
        method: Method,
        host: &str,
        path: &str,
        body: Option<&[u8]>,
        headers: &[(&str, &str)],
    ) -> Result<ResponseOf<T>, ErrorOf<T>> {
        let connection = self.transport.connect(host)?;
        connection.send(Request::new(method, host, path, body, headers))
    }

    pub fn get(
        &self,
        host: &str,
        path: &str,
        body: Option<&[u8]>,
        headers: &[(&str, &str)],
    ) -> Result<ResponseOf<T>, ErrorOf<T>> {
        self.request(Method::Get, host, path, body, headers)
    }

    pub fn post(
        &self,
        host: &str,
        path: &str,
        body: Option<&[u8]>,
        headers: &[(&str, &str)],
    ) -> Result<ResponseOf<T>, ErrorOf<T>> {
        self.request(Method::Post, host, path, body, headers)
    }

    pub fn put(
        &self,
        host: &str,
        path: &str,
        body: Option<&[u8]>,
        headers: &[(&str, &str)],
    ) -> Result<ResponseOf<T>, ErrorOf<T>> {
        self.request(Method::Put, host, path, body, headers)
    }
}

/// Generic HTTPS request over the default transport.
pub fn request(
    method: Method,
    host: &str,
    path: &str,
    body: Option<&[u8]>,
    headers: &[(&str, &str)],
) -> Result<ResponseOf<HttpsTransport>, ureq::Error> {
    RequestShim::<HttpsTransport>::default().request(method, host, path, body, headers)
}

/// HTTPS GET request.
pub fn get(
    host: &str,
    path: &str,
    body: Option<&[u8]>,
    headers: &[(&str, &str)],
) -> Result<ResponseOf<HttpsTransport>, ureq::Error> {
    request(Method::Get, host, path, body, headers)
}

/// HTTPS POST request.
pub fn post(
    host: &str,
    path: &str,
    body: Option<&[u8]>,
    headers: &[(&str, &str)],
) -> Result<ResponseOf<HttpsTransport>, ureq::Error> {
    request(Method::Post, host, path, body, headers)
}

/// HTTPS PUT request.
pub fn put(
    host: &str,
    path: &str,
    body: Option<&[u8]>,
    headers: &[(&str, &str)],
) -> Result<ResponseOf<HttpsTransport>, ureq::Error> {
    request(Method::Put, host, path, body, headers)
}
