//! The seam between the shim and the network.
//!
//! # Design
//! A `Transport` hands out a `Connection` per host, and a `Connection` is
//! consumed by `send`. One connection therefore carries exactly one request,
//! and the borrow checker rejects any attempt to reuse it.
//!
//! `HttpsTransport` is the real implementation on top of `ureq`. Every
//! `connect` builds a fresh `ureq::Agent`, so no pool or socket is shared
//! between calls. The agent opens its socket lazily, which means DNS, TCP and
//! TLS failures all come back from `send` as `ureq::Error`, untouched.
//!
//! The request URI is assembled from separate scheme, authority and path
//! parts. The path never contributes to the authority, so whatever it holds,
//! the socket goes to the connection's host.

use ureq::http::{Response, Uri};
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::http::{Method, Request};

/// Produces single-use connections to a host.
pub trait Transport {
    type Connection: Connection;

    fn connect(
        &self,
        host: &str,
    ) -> Result<Self::Connection, <Self::Connection as Connection>::Error>;
}

/// A connection good for exactly one request/response exchange.
pub trait Connection {
    type Response;
    type Error;

    fn send(self, request: Request) -> Result<Self::Response, Self::Error>;
}

/// URL scheme used by `HttpsTransport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP, for loopback servers without a certificate.
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// Secure transport backed by `ureq` and its default rustls TLS stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpsTransport {
    scheme: Scheme,
}

impl HttpsTransport {
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme }
    }

    /// Same transport over plain HTTP.
    pub fn plaintext() -> Self {
        Self::new(Scheme::Http)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }
}

impl Transport for HttpsTransport {
    type Connection = HttpsConnection;

    fn connect(&self, host: &str) -> Result<HttpsConnection, ureq::Error> {
        tracing::debug!(scheme = self.scheme.as_str(), host, "opening connection");

        // 4xx/5xx are responses, not failures.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Ok(HttpsConnection {
            agent,
            scheme: self.scheme,
            host: host.to_string(),
        })
    }
}

/// One `ureq` agent bound to one origin, consumed by its only request.
pub struct HttpsConnection {
    agent: Agent,
    scheme: Scheme,
    host: String,
}

impl HttpsConnection {
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Target URI for `path` on this connection's host.
    ///
    /// Fails with `ureq::Error::Http` when `host` is not a valid authority or
    /// `path` is not a valid path-and-query.
    pub fn uri(&self, path: &str) -> Result<Uri, ureq::Error> {
        let uri = Uri::builder()
            .scheme(self.scheme.as_str())
            .authority(self.host.as_str())
            .path_and_query(path)
            .build()?;
        Ok(uri)
    }
}

impl Connection for HttpsConnection {
    type Response = Response<Body>;
    type Error = ureq::Error;

    fn send(self, request: Request) -> Result<Response<Body>, ureq::Error> {
        let uri = self.uri(&request.path)?;
        tracing::debug!(
            method = request.method.as_str(),
            uri = %uri,
            headers = request.headers.len(),
            body_len = request.body.as_ref().map(Vec::len),
            "sending request"
        );

        match request.method {
            Method::Get => send_bodiless(self.agent.get(uri), request),
            Method::Head => send_bodiless(self.agent.head(uri), request),
            Method::Delete => send_bodiless(self.agent.delete(uri), request),
            Method::Post => send_with_body(self.agent.post(uri), request),
            Method::Put => send_with_body(self.agent.put(uri), request),
            Method::Patch => send_with_body(self.agent.patch(uri), request),
        }
    }
}

fn apply_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_bodiless(
    builder: RequestBuilder<WithoutBody>,
    request: Request,
) -> Result<Response<Body>, ureq::Error> {
    let builder = apply_headers(builder, &request.headers);
    match request.body {
        // The caller asked for a body on a bodiless verb; send it anyway.
        Some(body) => builder.force_send_body().send(&body[..]),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    request: Request,
) -> Result<Response<Body>, ureq::Error> {
    let builder = apply_headers(builder, &request.headers);
    match request.body {
        Some(body) => builder.send(&body[..]),
        None => builder.send_empty(),
    }
}
