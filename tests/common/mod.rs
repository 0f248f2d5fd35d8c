#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

/// Address nothing listens on, so remote calls fail fast
pub const UNREACHABLE_REMOTE: &str = "http://127.0.0.1:9/posts";

pub fn quotebook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.env_remove("QUOTEBOOK_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd.env("QUOTEBOOK_REMOTE_URL", UNREACHABLE_REMOTE);
    cmd
}

/// Initialize a quotebook in `dir`
pub fn init_book(dir: &Path) {
    quotebook_cmd().arg("init").arg(dir).assert().success();
}

/// Add a quote inside the quotebook at `dir`
pub fn add(dir: &Path, category: &str, text: &str) {
    quotebook_cmd()
        .current_dir(dir)
        .args(["add", text, "--category", category])
        .assert()
        .success();
}

/// Serve `body` as a JSON response to `requests` consecutive HTTP requests
pub fn serve_json(body: &'static str, requests: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/posts", listener.local_addr().unwrap());

    thread::spawn(move || {
        for _ in 0..requests {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    url
}
