//! HttpSearchApi against a local server with canned responses

use fossnav::{AppConfig, HttpSearchApi, NavError, SearchApi};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve one request, answer with `status` and `body`, return the request head
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });

    (base, handle)
}

fn api_for(base: &str) -> HttpSearchApi {
    let config = AppConfig::default().with_api_base(base).unwrap();
    HttpSearchApi::new(&config).unwrap()
}

#[test]
fn search_sends_encoded_query_and_decodes_results() {
    let body = r#"[
        {"title": "react", "description": "UI library", "url": "https://github.com/facebook/react",
         "stars": 220000, "forks": 45000, "watchers": 6700, "tags": ["javascript", "ui"],
         "skill_match_score": 0.82},
        {"title": "preact", "url": "https://github.com/preactjs/preact", "stars": 36000}
    ]"#;
    let (base, server) = serve_once("200 OK", body);

    let repos = api_for(&base).search("react native").unwrap();
    let head = server.join().unwrap();

    assert!(
        head.starts_with("GET /search?query=react+native HTTP/1.1"),
        "unexpected request: {}",
        head
    );
    assert!(head.to_ascii_lowercase().contains("accept: application/json"));

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].title, "react");
    assert_eq!(repos[0].skill_match_score, Some(0.82));
    assert_eq!(repos[1].title, "preact");
    assert_eq!(repos[1].forks, 0);
    assert!(repos[1].tags.is_empty());
}

#[test]
fn session_cookie_is_forwarded() {
    let (base, server) = serve_once("200 OK", "[]");

    let mut config = AppConfig::default().with_api_base(&base).unwrap();
    config.session_cookie = Some("session=abc123".to_string());
    let repos = HttpSearchApi::new(&config).unwrap().trending().unwrap();
    let head = server.join().unwrap();

    assert!(repos.is_empty());
    assert!(head.starts_with("GET /trending HTTP/1.1"));
    assert!(head.to_ascii_lowercase().contains("cookie: session=abc123"));
}

#[test]
fn error_status_is_reported() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);

    let err = api_for(&base).search("rust").unwrap_err();
    server.join().unwrap();

    match err {
        NavError::Status { status, .. } => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[test]
fn malformed_body_is_a_decode_error() {
    let (base, server) = serve_once("200 OK", "<html>not json</html>");

    let err = api_for(&base).search("rust").unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, NavError::Decode(_)), "got {:?}", err);
    assert!(err.is_recoverable());
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Bind then drop so the port is very likely closed
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let err = api_for(&format!("http://{}", addr)).search("rust").unwrap_err();
    assert!(matches!(err, NavError::Http(_)), "got {:?}", err);
}
