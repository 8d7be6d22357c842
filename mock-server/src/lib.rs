//! Scripted HTTP server for exercising clients over real sockets.
//!
//! Responses are enqueued ahead of time and served in FIFO order to any
//! path. The server speaks just enough HTTP/1.1 to answer one request per
//! connection, and can drop a connection after reading the request to
//! simulate a transport failure — the reason it sits on raw TCP instead of
//! a web framework.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the server treats the socket after reading a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocketPolicy {
    /// Write the scripted response, then close.
    #[default]
    KeepOpen,

    /// Read the request, then drop the connection without writing any
    /// response. The client observes a transport failure.
    DisconnectAfterRequest,
}

/// One scripted response. Defaults to an empty-bodied 200.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub socket_policy: SocketPolicy,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            body: String::new(),
            socket_policy: SocketPolicy::KeepOpen,
        }
    }
}

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn socket_policy(mut self, policy: SocketPolicy) -> Self {
        self.socket_policy = policy;
        self
    }
}

/// Shared response script, consumed front to back.
pub type Script = Arc<Mutex<VecDeque<MockResponse>>>;

/// An empty script.
pub fn script() -> Script {
    Arc::new(Mutex::new(VecDeque::new()))
}

/// Append `response` to the end of the script.
pub fn enqueue(script: &Script, response: MockResponse) {
    script.lock().unwrap().push_back(response);
}

/// Accept connections on `listener` and answer each request with the next
/// scripted response. An exhausted script serves the default response.
pub async fn run(listener: TcpListener, script: Script) -> Result<(), io::Error> {
    loop {
        let (stream, addr) = listener.accept().await?;
        debug!("connection from {addr}");
        let script = Arc::clone(&script);
        tokio::spawn(async move {
            if let Err(e) = serve_connection(stream, script).await {
                debug!("connection error: {e}");
            }
        });
    }
}

async fn serve_connection(mut stream: TcpStream, script: Script) -> Result<(), io::Error> {
    read_request(&mut stream).await?;
    let response = script.lock().unwrap().pop_front().unwrap_or_default();
    debug!(
        "serving HTTP {} ({:?})",
        response.status, response.socket_policy
    );
    match response.socket_policy {
        // Dropping the stream without a response is the whole point.
        SocketPolicy::DisconnectAfterRequest => Ok(()),
        SocketPolicy::KeepOpen => {
            stream.write_all(encode(&response).as_bytes()).await?;
            stream.shutdown().await
        }
    }
}

/// Read one full request: the head up to the blank line, then a
/// `Content-Length` body if the head declares one.
async fn read_request(stream: &mut TcpStream) -> Result<(), io::Error> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed mid-request",
            ));
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]);
    let declared = content_length(&head);
    let already_read = buf.len() - (head_end + 4);
    let mut remaining = declared.saturating_sub(already_read);
    while remaining > 0 {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed mid-body",
            ));
        }
        remaining = remaining.saturating_sub(n);
    }
    Ok(())
}

/// Byte offset of the `\r\n\r\n` terminating a request head.
fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// The `Content-Length` declared by a request head, or 0.
fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Serialize a scripted response as an HTTP/1.1 message.
fn encode(response: &MockResponse) -> String {
    format!(
        "HTTP/1.1 {} {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body
    )
}

/// Status-line reason phrase, derived from the status class.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        100..=199 => "Informational",
        200..=299 => "OK",
        300..=399 => "Redirection",
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unknown Status",
    }
}
