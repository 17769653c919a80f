#![allow(dead_code)]

use assert_cmd::Command;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

pub type Result<A> = std::result::Result<A, Box<dyn std::error::Error>>;

/// The binary, with a home directory that contains no netrc or config
/// file and without `SIM_API_URL` from the environment.
pub fn mk_cmd(home: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("sim-api")?;
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("SIM_API_URL")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn json(status: u16, value: serde_json::Value) -> StubResponse {
        StubResponse {
            status,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    pub fn text(status: u16, body: &str) -> StubResponse {
        StubResponse {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(status: u16, content_type: &'static str, body: &[u8]) -> StubResponse {
        StubResponse {
            status,
            content_type,
            body: body.to_vec(),
        }
    }
}

/// A request as seen by the stub server.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub authorization: Option<String>,
}

/// A tiny HTTP server answering requests with canned responses, keyed
/// by request target (path and query). Unknown targets get a 404.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&str, StubResponse)>) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, StubResponse> = routes
            .into_iter()
            .map(|(target, resp)| (target.to_string(), resp))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(s) => handle(s, &routes, &recorded),
                    Err(_) => break,
                }
            }
        });
        StubServer { base_url, requests }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(
    stream: TcpStream,
    routes: &HashMap<String, StubResponse>,
    recorded: &Arc<Mutex<Vec<Recorded>>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut authorization = None;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            }
        }
    }

    recorded.lock().unwrap().push(Recorded {
        method,
        target: target.clone(),
        authorization,
    });

    let resp = routes
        .get(&target)
        .cloned()
        .unwrap_or_else(|| StubResponse::text(404, "Not Found"));
    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        resp.status,
        resp.content_type,
        resp.body.len()
    );
    let _ = stream.write_all(&resp.body);
    let _ = stream.flush();
}

/// Writes a netrc file into `dir` and returns its path.
pub fn write_netrc(dir: &Path, content: &str) -> std::path::PathBuf {
    let file = dir.join("netrc");
    std::fs::write(&file, content).unwrap();
    file
}
