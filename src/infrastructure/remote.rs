//! Remote quote source over HTTP
//!
//! The remote serves a JSON array of posts. Only the `title` of each post is
//! used, and only the first `fetch_limit` posts are taken. New quotes are
//! POSTed back as JSON; the response is handed to the caller for logging.

use crate::domain::Quote;
use crate::error::{QuotebookError, Result};
use crate::infrastructure::Config;
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

/// Source of remote quotes and sink for new local ones
pub trait RemoteSource {
    /// Fetch the current remote snapshot
    fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Publish a newly added quote, returning the remote's JSON reply
    fn post_quote(&self, quote: &Quote) -> Result<serde_json::Value>;
}

#[derive(Debug, Deserialize)]
struct RemotePost {
    title: String,
}

/// Map a JSON array of posts to server quotes, keeping the first `limit`
pub fn quotes_from_posts(body: &str, limit: usize) -> Result<Vec<Quote>> {
    let posts: Vec<RemotePost> = serde_json::from_str(body)
        .map_err(|e| QuotebookError::Remote(format!("Unexpected response body: {}", e)))?;

    Ok(posts
        .into_iter()
        .take(limit)
        .map(|post| Quote::server(post.title))
        .collect())
}

/// Blocking HTTP implementation of [`RemoteSource`]
pub struct HttpRemote {
    agent: Agent,
    url: String,
    fetch_limit: usize,
}

impl HttpRemote {
    pub fn new(url: impl Into<String>, fetch_limit: usize, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        HttpRemote {
            agent,
            url: url.into(),
            fetch_limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.effective_remote_url(),
            config.fetch_limit,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSource for HttpRemote {
    fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let mut response = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(|e| QuotebookError::Remote(format!("GET {} failed: {}", self.url, e)))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| QuotebookError::Remote(format!("Failed to read response body: {}", e)))?;

        quotes_from_posts(&body, self.fetch_limit)
    }

    fn post_quote(&self, quote: &Quote) -> Result<serde_json::Value> {
        let payload = serde_json::to_string(quote)?;

        let mut response = self
            .agent
            .post(self.url.as_str())
            .header("Content-Type", "application/json")
            .send(payload.as_str())
            .map_err(|e| QuotebookError::Remote(format!("POST {} failed: {}", self.url, e)))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| QuotebookError::Remote(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| QuotebookError::Remote(format!("Unexpected response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve a single canned HTTP response on a local port and return its URL
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/posts", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break request.len();
                }
            };

            // Drain the request body so closing the socket does not reset it
            let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    #[test]
    fn test_quotes_from_posts_maps_titles() {
        let body = r#"[{"userId":1,"id":1,"title":"first","body":"..."},{"id":2,"title":"second"}]"#;
        let quotes = quotes_from_posts(body, 10).unwrap();
        assert_eq!(quotes, vec![Quote::server("first"), Quote::server("second")]);
    }

    #[test]
    fn test_quotes_from_posts_applies_limit() {
        let body = r#"[{"title":"1"},{"title":"2"},{"title":"3"}]"#;
        let quotes = quotes_from_posts(body, 2).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].text, "2");
    }

    #[test]
    fn test_quotes_from_posts_rejects_non_array() {
        let err = quotes_from_posts(r#"{"title":"x"}"#, 10).unwrap_err();
        assert!(matches!(err, QuotebookError::Remote(_)));
    }

    #[test]
    fn test_quotes_from_posts_requires_title() {
        assert!(quotes_from_posts(r#"[{"id":1}]"#, 10).is_err());
    }

    #[test]
    fn test_fetch_quotes_over_http() {
        let (url, handle) = serve_once("200 OK", r#"[{"title":"remote one"}]"#);
        let remote = HttpRemote::new(url, 10, Duration::from_secs(5));

        let quotes = remote.fetch_quotes().unwrap();
        assert_eq!(quotes, vec![Quote::server("remote one")]);

        let request = handle.join().unwrap();
        assert!(request.starts_with("GET /posts"));
    }

    #[test]
    fn test_fetch_quotes_http_error_status() {
        let (url, handle) = serve_once("500 Internal Server Error", "{}");
        let remote = HttpRemote::new(url, 10, Duration::from_secs(5));

        assert!(matches!(
            remote.fetch_quotes().unwrap_err(),
            QuotebookError::Remote(_)
        ));
        handle.join().unwrap();
    }

    #[test]
    fn test_post_quote_returns_reply() {
        let (url, handle) = serve_once("201 Created", r#"{"id":101}"#);
        let remote = HttpRemote::new(url, 10, Duration::from_secs(5));

        let reply = remote.post_quote(&Quote::new("A", "x").unwrap()).unwrap();
        assert_eq!(reply["id"], 101);

        let request = handle.join().unwrap();
        assert!(request.starts_with("POST /posts"));
        assert!(request
            .to_lowercase()
            .contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"text":"A","category":"x"}"#));
    }

    #[test]
    fn test_fetch_quotes_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/posts", listener.local_addr().unwrap());
        drop(listener);

        let remote = HttpRemote::new(url, 10, Duration::from_secs(2));
        assert!(remote.fetch_quotes().is_err());
    }
}
