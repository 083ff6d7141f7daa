use crossbeam_channel::{bounded, Receiver};
use hacker_stories::{
    search_once, AppConfig, FileStore, MemoryStore, Phase, StoriesApp, StoriesError, Story,
    StoryFetcher, StoryId,
};
use parking_lot::Mutex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const ENDPOINT: &str = "https://hn.test/search?query=";
const WAIT: Duration = Duration::from_secs(5);

fn config() -> AppConfig {
    AppConfig {
        endpoint: ENDPOINT.to_string(),
        ..AppConfig::default()
    }
}

fn story(id: u64, title: &str) -> Story {
    Story {
        title: title.to_string(),
        url: Some(format!("https://example.com/{id}")),
        author: "author".to_string(),
        num_comments: id,
        points: id + 10,
        object_id: StoryId::from(id),
    }
}

/// Answers every request with the same stories and remembers the URLs.
struct StaticFetcher {
    stories: Vec<Story>,
    urls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    fn new(stories: Vec<Story>) -> Arc<Self> {
        Arc::new(Self {
            stories,
            urls: Mutex::new(Vec::new()),
        })
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

impl StoryFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> hacker_stories::Result<Vec<Story>> {
        self.urls.lock().push(url.to_string());
        Ok(self.stories.clone())
    }
}

struct FailingFetcher;

impl StoryFetcher for FailingFetcher {
    fn fetch(&self, _url: &str) -> hacker_stories::Result<Vec<Story>> {
        Err(StoriesError::HttpStatus(503))
    }
}

/// Requests whose URL contains "slow" block until the gate opens.
struct GatedFetcher {
    gate: Receiver<()>,
}

impl StoryFetcher for GatedFetcher {
    fn fetch(&self, url: &str) -> hacker_stories::Result<Vec<Story>> {
        if url.contains("slow") {
            let _ = self.gate.recv_timeout(WAIT);
            Ok(vec![story(100, "stale")])
        } else {
            Ok(vec![story(200, "fresh")])
        }
    }
}

#[test]
fn submit_react_loads_two_stories_in_order() {
    let fetcher = StaticFetcher::new(vec![story(0, "React"), story(1, "Redux")]);
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), fetcher.clone());

    app.search_mut().input("React");
    assert!(app.submit());
    assert_eq!(
        app.search().request_url(),
        Some("https://hn.test/search?query=React")
    );
    assert!(app.state().is_loading());

    assert!(app.wait_for_fetch(WAIT));
    let state = app.state();
    assert_eq!(state.phase, Phase::Success);
    assert!(!state.is_error());
    let titles: Vec<_> = state.data.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["React", "Redux"]);
    assert_eq!(fetcher.urls(), ["https://hn.test/search?query=React"]);
}

#[test]
fn empty_term_submits_nothing() {
    let fetcher = StaticFetcher::new(vec![story(0, "React")]);
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), fetcher.clone());
    let before = app.state().clone();

    app.search_mut().input("");
    assert!(!app.submit());
    assert_eq!(
        app.search().request_url(),
        Some("https://hn.test/search?query=React")
    );
    assert_eq!(app.state(), &before);
    assert!(fetcher.urls().is_empty());
}

#[test]
fn dismiss_removes_only_that_story() {
    let demo = AppConfig {
        demo: true,
        ..config()
    };
    let mut app = StoriesApp::new(MemoryStore::new(), &demo, StaticFetcher::new(Vec::new()));
    app.mount();

    let redux = app.state().data[1].clone();
    assert_eq!(redux.object_id, StoryId::from(1));
    app.dismiss(&redux);

    let ids: Vec<_> = app.state().data.iter().map(|s| s.object_id.clone()).collect();
    assert_eq!(ids, vec![StoryId::from(0)]);
    assert_eq!(app.state().phase, Phase::Idle);
}

#[test]
fn failed_request_shows_error_not_success() {
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), Arc::new(FailingFetcher));
    app.mount();
    assert!(app.wait_for_fetch(WAIT));

    let state = app.state();
    assert!(state.is_error());
    assert!(!state.is_loading());
    assert_eq!(state.phase, Phase::Error);
}

#[test]
fn resubmit_after_failure_recovers() {
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), Arc::new(FailingFetcher));
    app.mount();
    app.wait_for_fetch(WAIT);
    assert!(app.state().is_error());

    assert!(app.submit());
    assert!(app.state().is_loading());
    assert!(!app.state().is_error());
}

#[test]
fn one_loading_transition_before_each_result() {
    let fetcher = StaticFetcher::new(vec![story(3, "three")]);
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), fetcher);
    let phases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&phases);
    app.lifecycle_mut()
        .subscribe(move |state| sink.borrow_mut().push(state.phase));

    app.submit();
    app.wait_for_fetch(WAIT);
    app.search_mut().input("Rust");
    app.submit();
    app.wait_for_fetch(WAIT);

    assert_eq!(
        *phases.borrow(),
        [Phase::Loading, Phase::Success, Phase::Loading, Phase::Success]
    );
}

#[test]
fn superseded_response_never_overwrites_newer_one() {
    let (open_gate, gate) = bounded(1);
    let mut app = StoriesApp::new(MemoryStore::new(), &config(), Arc::new(GatedFetcher { gate }));

    app.search_mut().input("slow");
    app.submit();
    app.search_mut().input("quick");
    app.submit();

    assert!(app.wait_for_fetch(WAIT));
    assert_eq!(app.state().data[0].title, "fresh");

    // Let the superseded request finish; its result must be dropped
    open_gate.send(()).unwrap();
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(app.process_messages(), 0);
    assert_eq!(app.state().data[0].title, "fresh");
    assert_eq!(app.state().phase, Phase::Success);
}

#[test]
fn search_term_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let fetcher = StaticFetcher::new(Vec::new());

    {
        let store = FileStore::open(&path).unwrap();
        let mut app = StoriesApp::new(store, &config(), fetcher.clone());
        assert_eq!(app.term(), "React");
        app.search_mut().input("Rust");
    }

    let store = FileStore::open(&path).unwrap();
    let mut app = StoriesApp::new(store, &config(), fetcher.clone());
    assert_eq!(app.term(), "Rust");

    // The restored term drives the request issued on start
    app.mount();
    assert!(app.wait_for_fetch(WAIT));
    assert_eq!(fetcher.urls(), ["https://hn.test/search?query=Rust"]);
}

#[test]
fn one_shot_search_leaves_remembered_term_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let config = AppConfig {
        store_path: path.clone(),
        ..config()
    };
    let fetcher = StaticFetcher::new(vec![story(0, "React"), story(1, "Redux")]);

    let stories = search_once(&config, fetcher.clone(), "Rust", WAIT).unwrap();
    assert_eq!(stories.len(), 2);
    assert_eq!(fetcher.urls(), ["https://hn.test/search?query=Rust"]);
    assert!(!path.exists());
}

#[test]
fn one_shot_search_rejects_empty_term() {
    let fetcher = StaticFetcher::new(vec![story(0, "React")]);

    let err = search_once(&config(), fetcher.clone(), "", WAIT).unwrap_err();
    assert!(matches!(err, StoriesError::EmptyTerm));
    assert!(!err.is_fetch_failure());
    assert!(fetcher.urls().is_empty());
}

#[test]
fn one_shot_search_reports_failure() {
    let err = search_once(&config(), Arc::new(FailingFetcher), "React", WAIT).unwrap_err();
    assert!(err.is_fetch_failure());
}
