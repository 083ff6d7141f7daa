use hacker_stories::{AppConfig, HttpFetcher, MemoryStore, StoriesApp, StoriesError, StoryFetcher};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(10);

const TWO_HITS: &str = r#"{
  "hits": [
    {
      "title": "React",
      "url": "https://reactjs.org/",
      "author": "Jordan Walke",
      "num_comments": 3,
      "points": 4,
      "objectID": "0",
      "created_at": "2013-05-29T00:00:00Z"
    },
    {
      "title": "Redux",
      "url": null,
      "author": "Dan Abramov, Andrew Clark",
      "num_comments": 2,
      "points": 5,
      "objectID": 1
    }
  ],
  "nbHits": 2
}"#;

/// Serve one canned response on a local port and return the search endpoint.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
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
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}/api/v1/search?query=")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(5)).unwrap()
}

fn mounted_app(endpoint: String) -> StoriesApp<MemoryStore> {
    let config = AppConfig {
        endpoint,
        ..AppConfig::default()
    };
    let mut app = StoriesApp::new(MemoryStore::new(), &config, Arc::new(fetcher()));
    app.mount();
    assert!(app.wait_for_fetch(WAIT));
    app
}

#[test]
fn two_hit_response_arrives_in_order() {
    let endpoint = serve_once("200 OK", TWO_HITS);
    let stories = fetcher().fetch(&format!("{endpoint}React")).unwrap();

    let titles: Vec<_> = stories.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["React", "Redux"]);
    assert_eq!(stories[1].object_id.as_str(), "1");
    assert_eq!(stories[1].url, None);
}

#[test]
fn initial_search_loads_stories_over_http() {
    let app = mounted_app(serve_once("200 OK", TWO_HITS));

    let state = app.state();
    assert!(!state.is_loading());
    assert!(!state.is_error());
    let ids: Vec<_> = state.data.iter().map(|s| s.object_id.as_str()).collect();
    assert_eq!(ids, ["0", "1"]);
}

#[test]
fn service_unavailable_is_an_http_status_error() {
    let endpoint = serve_once("503 Service Unavailable", "{}");
    match fetcher().fetch(&format!("{endpoint}React")) {
        Err(StoriesError::HttpStatus(503)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn service_unavailable_ends_in_error_state() {
    let app = mounted_app(serve_once("503 Service Unavailable", "{}"));

    let state = app.state();
    assert!(state.is_error());
    assert!(!state.is_loading());
    assert!(state.data.is_empty());
}

#[test]
fn malformed_body_is_a_decode_error() {
    let endpoint = serve_once("200 OK", r#"{"hits": [{"title": "no other fields"}]}"#);
    let err = fetcher().fetch(&format!("{endpoint}React")).unwrap_err();

    assert!(matches!(err, StoriesError::Decode(_)), "got {err:?}");
    assert!(err.is_fetch_failure());
}
