//! Loopback servers standing in for the source page and the live feed

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use button_monitor::monitor::{CountdownMessage, MessageError, StreamHandler};
use tungstenite::Message;

/// Serve a single HTTP response, returning the URL to request.
pub fn serve_page_once(status: &'static str, body: String) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind HTTP listener");
    let addr = listener.local_addr().expect("Failed to read HTTP address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("Failed to accept HTTP client");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).expect("Failed to read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("Failed to write response");
    });

    (format!("http://{addr}/r/thebutton"), handle)
}

/// Accept one WebSocket client, send `messages` as text frames, then close.
pub fn serve_feed_once(messages: Vec<String>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind feed listener");
    let addr = listener.local_addr().expect("Failed to read feed address");

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept feed client");
        let mut ws = tungstenite::accept(stream).expect("WebSocket handshake failed");

        for message in messages {
            ws.send(Message::text(message)).expect("Failed to send message");
        }
        ws.close(None).expect("Failed to start close handshake");

        // Drain until the client's close reply arrives.
        while ws.read().is_ok() {}
    });

    (format!("ws://{addr}/thebutton?h=loopback"), handle)
}

/// Like [`serve_feed_once`], but hold the connection open until `release`
/// fires.
pub fn serve_feed_until(messages: Vec<String>, release: Receiver<()>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind feed listener");
    let addr = listener.local_addr().expect("Failed to read feed address");

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept feed client");
        let mut ws = tungstenite::accept(stream).expect("WebSocket handshake failed");

        for message in messages {
            ws.send(Message::text(message)).expect("Failed to send message");
        }
        let _ = release.recv();
        ws.close(None).expect("Failed to start close handshake");

        while ws.read().is_ok() {}
    });

    (format!("ws://{addr}/thebutton?h=loopback"), handle)
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("Failed to read address").port()
}

/// Handler that records every callback.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<String>,
}

impl StreamHandler for Recorder {
    fn on_open(&mut self) {
        self.events.push("open".to_string());
    }

    fn on_close(&mut self) {
        self.events.push("close".to_string());
    }

    fn on_message(&mut self, raw: &str) -> Result<(), MessageError> {
        let message = CountdownMessage::parse(raw)?;
        self.events
            .push(format!("tick {}", message.seconds_remaining));
        Ok(())
    }
}

pub fn tick(seconds: u32) -> String {
    format!(r#"{{"type":"ticking","payload":{{"seconds_left":{seconds}}}}}"#)
}
