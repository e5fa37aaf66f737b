//! Loopback HTTP server for transport tests
//!
//! Accepts one connection on 127.0.0.1, captures the raw request and
//! answers with a canned response. No external network is touched.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A server that answers exactly one request
pub struct OneShotServer {
    pub addr: SocketAddr,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Reply with `status` and `body` once the request is read
    pub fn answering(status: u16, reason: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        Self::spawn(move |request, stream| {
            // a link probe hangs up without sending a request
            let _ = stream.write_all(response.as_bytes());
            request
        })
    }

    /// Read the request, then hold the connection open without answering
    pub fn silent(hold: Duration) -> Self {
        Self::spawn(move |request, _stream| {
            thread::sleep(hold);
            request
        })
    }

    fn spawn<F>(respond: F) -> Self
    where
        F: FnOnce(String, &mut std::net::TcpStream) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            respond(request, &mut stream)
        });
        Self { addr, handle }
    }

    /// URL on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for the server thread and return the raw request it saw
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// Read headers, then as many body bytes as Content-Length announces
fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&raw).into_owned();
        }
        raw.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&raw, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&raw[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while raw.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&raw).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// An address nothing listens on
pub fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
