//! Minimal HTTP/1.1 server standing in for the archive index (or a proxy).
//!
//! Answers every GET with a fixed plain-text body, optionally failing the
//! first N requests or any request whose line contains a marker, and
//! optionally stalling before it answers. Records each request head.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Body served with 200 OK.
    pub body: String,
    /// The first `fail_first` requests get 500.
    pub fail_first: usize,
    /// Requests whose request line contains this string always get 500.
    pub fail_when_contains: Option<String>,
    /// Wait this long before answering.
    pub delay: Option<Duration>,
}

pub struct TestServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serves `body` with 200 OK to every request.
pub fn start(body: &str) -> TestServer {
    start_with_options(ServerOptions {
        body: body.to_string(),
        ..Default::default()
    })
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start_with_options(opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let opts = Arc::new(opts);
    {
        let hits = Arc::clone(&hits);
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let hits = Arc::clone(&hits);
                let requests = Arc::clone(&requests);
                let opts = Arc::clone(&opts);
                thread::spawn(move || handle(stream, &opts, &hits, &requests));
            }
        });
    }
    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits,
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    opts: &ServerOptions,
    hits: &AtomicUsize,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
    let request_line = request.lines().next().unwrap_or("").to_string();
    let seq = hits.fetch_add(1, Ordering::SeqCst);
    requests.lock().unwrap().push(request);

    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }

    let marked = opts
        .fail_when_contains
        .as_deref()
        .is_some_and(|m| request_line.contains(m));
    let response = if seq < opts.fail_first || marked {
        let msg = "internal error";
        format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            msg.len(),
            msg
        )
    } else {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            opts.body.len(),
            opts.body
        )
    };
    let _ = stream.write_all(response.as_bytes());
}

/// Returns the header value for `name` from a recorded request head.
pub fn header<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    request.lines().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
