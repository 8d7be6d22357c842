//! Shared helpers for the adapter integration tests.
//!
//! Starts the scripted mock server the same way the rest of the workspace
//! does (std listener on a random port, current-thread runtime on a
//! background thread) and provides a ureq-backed [`Call`] plus recording
//! observers with assertion helpers.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use completable_core::{Call, CallError, CompletableObserver, Disposable, Request, Response, SingleObserver};
use mock_server::Script;

/// Start a scripted mock server on a random port.
pub fn start_server() -> (SocketAddr, Script) {
    let _ = env_logger::builder().is_test(true).try_init();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let responses = mock_server::script();
    let server_script = responses.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, server_script).await
        })
        .unwrap();
    });

    (addr, responses)
}

/// A GET [`Call`] executed with ureq.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data; status interpretation belongs to the adapters under test.
pub struct UreqCall {
    url: String,
}

impl UreqCall {
    pub fn get(addr: SocketAddr, path: &str) -> Self {
        Self {
            url: format!("http://{addr}{path}"),
        }
    }
}

impl Call for UreqCall {
    fn request(&self) -> Request {
        Request::get(&self.url)
    }

    fn execute(&self) -> Result<Response, io::Error> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let mut response = agent.get(&self.url).call().map_err(io::Error::other)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(Response { status, body })
    }
}

#[derive(Debug)]
pub enum Event {
    Subscribed,
    Completed,
    Error(CallError),
}

/// Records every completable callback for later assertions. Clones share
/// the same event log, so a test can keep one half and subscribe the other.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingObserver {
    pub fn assert_complete(&self) {
        let events = self.events.lock().unwrap();
        assert!(
            matches!(events.as_slice(), [Event::Subscribed, Event::Completed]),
            "expected subscribe then complete, got {events:?}"
        );
    }

    pub fn assert_http_error(&self, message: &str) {
        let events = self.events.lock().unwrap();
        match events.as_slice() {
            [Event::Subscribed, Event::Error(e @ CallError::HttpStatus { .. })] => {
                assert_eq!(e.to_string(), message);
            }
            other => panic!("expected an HTTP status error, got {other:?}"),
        }
    }

    pub fn assert_transport_error(&self) {
        let events = self.events.lock().unwrap();
        assert!(
            matches!(
                events.as_slice(),
                [Event::Subscribed, Event::Error(CallError::Transport(_))]
            ),
            "expected a transport error, got {events:?}"
        );
    }

    /// Block until a terminal signal lands; for enqueued-mode tests.
    pub fn await_terminal(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        loop {
            if self.events.lock().unwrap().len() >= 2 {
                return;
            }
            assert!(
                Instant::now() < deadline,
                "no terminal signal within {timeout:?}"
            );
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}

impl CompletableObserver for RecordingObserver {
    fn on_subscribe(&mut self, _disposable: Disposable) {
        self.events.lock().unwrap().push(Event::Subscribed);
    }

    fn on_complete(&mut self) {
        self.events.lock().unwrap().push(Event::Completed);
    }

    fn on_error(&mut self, error: CallError) {
        self.events.lock().unwrap().push(Event::Error(error));
    }
}

#[derive(Debug)]
pub enum SingleEvent<T> {
    Subscribed,
    Success(T),
    Error(CallError),
}

/// Records every single callback for later assertions.
pub struct RecordingSingleObserver<T> {
    events: Arc<Mutex<Vec<SingleEvent<T>>>>,
}

impl<T> Default for RecordingSingleObserver<T> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for RecordingSingleObserver<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: std::fmt::Debug> RecordingSingleObserver<T> {
    pub fn assert_success(&self, check: impl FnOnce(&T)) {
        let events = self.events.lock().unwrap();
        match events.as_slice() {
            [SingleEvent::Subscribed, SingleEvent::Success(value)] => check(value),
            other => panic!("expected subscribe then success, got {other:?}"),
        }
    }

    pub fn assert_http_error(&self, message: &str) {
        let events = self.events.lock().unwrap();
        match events.as_slice() {
            [SingleEvent::Subscribed, SingleEvent::Error(e @ CallError::HttpStatus { .. })] => {
                assert_eq!(e.to_string(), message);
            }
            other => panic!("expected an HTTP status error, got {other:?}"),
        }
    }

    pub fn assert_transport_error(&self) {
        let events = self.events.lock().unwrap();
        assert!(
            matches!(
                events.as_slice(),
                [SingleEvent::Subscribed, SingleEvent::Error(CallError::Transport(_))]
            ),
            "expected a transport error, got {events:?}"
        );
    }
}

impl<T: Send + std::fmt::Debug> SingleObserver<T> for RecordingSingleObserver<T> {
    fn on_subscribe(&mut self, _disposable: Disposable) {
        self.events.lock().unwrap().push(SingleEvent::Subscribed);
    }

    fn on_success(&mut self, value: T) {
        self.events.lock().unwrap().push(SingleEvent::Success(value));
    }

    fn on_error(&mut self, error: CallError) {
        self.events.lock().unwrap().push(SingleEvent::Error(error));
    }
}
