//! Shared helpers for tests that exercise the HTTP boundary.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serves one canned HTTP response on a loopback port and returns the URL to
/// request. The listener thread exits after the first connection.
pub(crate) fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status_line = status_line.to_string();
    let body = body.to_string();
    thread::spawn(move || {
        if let Ok((mut socket, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes());
        }
    });
    format!("http://{}/", addr)
}
