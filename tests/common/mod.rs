//! Shared test support: a minimal one-shot HTTP service mock
//!
//! Binds a loopback listener, serves exactly one request, and hands the raw
//! request text back to the test for inspection. Small enough to keep the
//! protocol tests against a real socket instead of a stubbed transport.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct MockService {
    pub url: String,
    handle: JoinHandle<String>,
}

impl MockService {
    /// Serve exactly one request with the given status line and body
    pub fn respond_with(status_line: &'static str, body: &'static str) -> Self {
        let listener = bind();
        let url = local_url(&listener);
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                len = body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        MockService { url, handle }
    }

    /// Accept one connection and drop it without answering
    pub fn drop_connection() -> Self {
        let listener = bind();
        let url = local_url(&listener);
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
            String::new()
        });
        MockService { url, handle }
    }

    /// Accept one connection and stall without answering
    ///
    /// Long enough to outlive any client timeout a test configures.
    pub fn stall(duration: Duration) -> Self {
        let listener = bind();
        let url = local_url(&listener);
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            thread::sleep(duration);
            request
        });
        MockService { url, handle }
    }

    /// A URL nothing is listening on
    pub fn refused_url() -> String {
        let listener = bind();
        let url = local_url(&listener);
        drop(listener);
        url
    }

    /// The raw request text the mock received
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// Body of a raw HTTP request (everything after the blank line)
pub fn request_body(request: &str) -> &str {
    request
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("")
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn bind() -> TcpListener {
    TcpListener::bind("127.0.0.1:0").unwrap()
}

fn local_url(listener: &TcpListener) -> String {
    format!("http://{}", listener.local_addr().unwrap())
}

/// Read one HTTP request: headers, then Content-Length worth of body
fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let header = String::from_utf8_lossy(&buf[..end]).to_string();
            let content_length = header
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            let body_start = end + 4;
            while buf.len() < body_start + content_length {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
