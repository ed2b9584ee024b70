//! Shared helpers for the shim's integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use https_shim::{Connection, Request, Transport};
use mock_server::MockState;

/// Failure the recording transport should inject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Failure {
    #[default]
    None,
    OnConnect,
    OnSend,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    #[error("connection refused by {0}")]
    ConnectionRefused(String),

    #[error("connection reset while sending {0}")]
    Reset(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub sequence: usize,
}

#[derive(Debug, Default)]
pub struct Log {
    pub connects: Vec<String>,
    pub sent: Vec<Request>,
}

/// Transport that records every connect and send instead of touching the
/// network.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    failure: Failure,
    log: Arc<Mutex<Log>>,
}

impl RecordingTransport {
    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Self::default()
        }
    }

    pub fn connects(&self) -> Vec<String> {
        self.log.lock().unwrap().connects.clone()
    }

    pub fn sent(&self) -> Vec<Request> {
        self.log.lock().unwrap().sent.clone()
    }
}

pub struct RecordingConnection {
    fail: bool,
    log: Arc<Mutex<Log>>,
}

impl Transport for RecordingTransport {
    type Connection = RecordingConnection;

    fn connect(&self, host: &str) -> Result<RecordingConnection, MockError> {
        self.log.lock().unwrap().connects.push(host.to_string());
        if self.failure == Failure::OnConnect {
            return Err(MockError::ConnectionRefused(host.to_string()));
        }
        Ok(RecordingConnection {
            fail: self.failure == Failure::OnSend,
            log: Arc::clone(&self.log),
        })
    }
}

impl Connection for RecordingConnection {
    type Response = MockResponse;
    type Error = MockError;

    fn send(self, request: Request) -> Result<MockResponse, MockError> {
        let mut log = self.log.lock().unwrap();
        let path = request.path.clone();
        log.sent.push(request);
        if self.fail {
            return Err(MockError::Reset(path));
        }
        Ok(MockResponse {
            status: 200,
            sequence: log.sent.len(),
        })
    }
}

/// Start the mock server on a random loopback port from a background thread.
pub fn start_mock_server(state: MockState) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, state).await
        })
        .unwrap();
    });

    addr
}

/// A loopback address with nothing listening on it.
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
