use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use super::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportFailure};

/// Scripted transport: records every request and replays queued outcomes in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    replies: VecDeque<Result<HttpResponse, TransportFailure>>,
}

impl FakeTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        let fake = Self::default();
        fake.push_reply(status, body);
        fake
    }

    pub fn push_reply(&self, status: u16, body: impl Into<String>) {
        self.state.lock().unwrap().replies.push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    pub fn push_failure(&self, failure: TransportFailure) {
        self.state.lock().unwrap().replies.push_back(Err(failure));
    }

    pub fn push_connection_reset(&self) {
        self.push_failure(TransportFailure::Connect(Box::new(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))));
    }

    pub fn push_timeout(&self) {
        self.push_failure(TransportFailure::Timeout(Box::new(io::Error::new(
            io::ErrorKind::TimedOut,
            "operation timed out",
        ))));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            state.replies.pop_front().unwrap_or_else(|| {
                Err(TransportFailure::Request(
                    "fake transport has no scripted reply".into(),
                ))
            })
        })
    }
}

pub(crate) fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
