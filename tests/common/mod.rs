//! Minimal stand-in for the mcstatus.io API.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Serves one canned response to every request on a loopback port.
pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub fn start(status: u16, body: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock api");
        let base_url = format!("http://{}", listener.local_addr().expect("mock api addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let seen = Arc::clone(&seen);
                thread::spawn(move || serve(&stream, status, body, delay, &seen));
            }
        });

        Self { base_url, requests }
    }

    pub fn ok(body: &'static str) -> Self {
        Self::start(200, body, Duration::ZERO)
    }

    /// Request lines received so far, e.g. `GET /v2/status/java/a:1?timeout=5 HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn serve(stream: &TcpStream, status: u16, body: &str, delay: Duration, seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => return,
            Ok(_) if header == "\r\n" => break,
            Ok(_) => {}
        }
    }
    seen.lock().expect("requests lock").push(request_line.trim_end().to_string());

    thread::sleep(delay);

    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut out = stream;
    let _ = out.write_all(response.as_bytes());
    let _ = out.flush();
}
