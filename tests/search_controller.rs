//! Search controller behavior against an in-memory Search API

use crossbeam_channel::{bounded, Receiver, Sender};
use fossnav::search::ToastLevel;
use fossnav::{NavError, Repository, SearchApi, SearchController, SearchView};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const QUIET: Duration = Duration::from_millis(300);
const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone)]
enum Reply {
    Repos(Vec<Repository>),
    Status(u16),
}

/// Records every query and answers from a table; unknown queries get `[]`
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    replies: Mutex<HashMap<String, Reply>>,
    /// Queries that block until the paired sender is dropped or signalled
    gates: Mutex<HashMap<String, Receiver<()>>>,
    finished: AtomicUsize,
}

impl FakeApi {
    fn reply(&self, query: &str, reply: Reply) {
        self.replies.lock().insert(query.to_string(), reply);
    }

    fn gate(&self, query: &str) -> Sender<()> {
        let (tx, rx) = bounded(1);
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl SearchApi for FakeApi {
    fn search(&self, query: &str) -> fossnav::Result<Vec<Repository>> {
        self.calls.lock().push(query.to_string());

        let gate = self.gates.lock().remove(query);
        if let Some(gate) = gate {
            let _ = gate.recv_timeout(WAIT);
        }

        let reply = self.replies.lock().get(query).cloned();
        self.finished.fetch_add(1, Ordering::SeqCst);
        match reply {
            Some(Reply::Repos(repos)) => Ok(repos),
            Some(Reply::Status(code)) => Err(NavError::Status {
                status: code,
                reason: "Internal Server Error".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn trending(&self) -> fossnav::Result<Vec<Repository>> {
        Ok(Vec::new())
    }
}

fn repo(title: &str) -> Repository {
    Repository {
        title: title.to_string(),
        description: format!("{} description", title),
        url: format!("https://github.com/example/{}", title),
        stars: 10,
        forks: 2,
        watchers: 1,
        tags: vec!["foss".to_string()],
        skill_match_score: None,
        difficulty: None,
    }
}

fn titles(controller: &SearchController) -> Vec<String> {
    controller
        .state()
        .results
        .iter()
        .map(|r| r.title.clone())
        .collect()
}

/// Wait until the fake has answered `n` searches, then let the worker report
fn wait_for_answers(api: &FakeApi, n: usize) {
    let deadline = Instant::now() + WAIT;
    while api.finished.load(Ordering::SeqCst) < n && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    std::thread::sleep(Duration::from_millis(50));
}

fn setup() -> (Arc<FakeApi>, SearchController) {
    let api = Arc::new(FakeApi::default());
    let controller = SearchController::new(api.clone(), QUIET, Duration::from_secs(4));
    (api, controller)
}

#[test]
fn typing_burst_sends_one_request_for_final_text() {
    let (api, mut controller) = setup();
    api.reply("react", Reply::Repos(vec![repo("react")]));

    let t0 = Instant::now();
    for (i, text) in ["r", "re", "rea", "reac", "react"].iter().enumerate() {
        let now = t0 + Duration::from_millis(50 * i as u64);
        controller.on_input_change(*text, now);
        controller.tick(now);
    }

    // Last keystroke at +200ms; nothing fires before +500ms
    assert!(!controller.tick(t0 + Duration::from_millis(499)));
    assert!(api.calls().is_empty());
    assert!(controller.is_pending());

    controller.tick(t0 + Duration::from_millis(500));
    assert!(controller.wait_for_completion(WAIT));

    assert_eq!(api.calls(), vec!["react".to_string()]);
    assert_eq!(controller.requests_issued(), 1);
    assert_eq!(titles(&controller), vec!["react".to_string()]);
    assert_eq!(controller.state().query, "react");
}

#[test]
fn whitespace_query_clears_results_without_a_request() {
    let (api, mut controller) = setup();
    api.reply("rust", Reply::Repos(vec![repo("ripgrep"), repo("tokio")]));

    controller.submit("rust");
    assert!(controller.wait_for_completion(WAIT));
    assert_eq!(controller.state().results.len(), 2);

    let t0 = Instant::now();
    controller.on_input_change("   ", t0);
    controller.tick(t0 + QUIET);

    assert_eq!(api.calls().len(), 1);
    assert!(controller.state().results.is_empty());
    assert!(!controller.state().loading);
    assert!(matches!(controller.view(), SearchView::Idle));
}

#[test]
fn results_keep_backend_order() {
    let (api, mut controller) = setup();
    api.reply(
        "editor",
        Reply::Repos(vec![repo("zed"), repo("helix"), repo("lapce")]),
    );

    controller.submit("editor");
    assert!(controller.wait_for_completion(WAIT));

    assert_eq!(titles(&controller), vec!["zed", "helix", "lapce"]);
    match controller.view() {
        SearchView::Results(repos) => assert_eq!(repos.len(), 3),
        _ => panic!("expected results view"),
    }
}

#[test]
fn failure_keeps_previous_results_and_raises_toast() {
    let (api, mut controller) = setup();
    api.reply("rust", Reply::Repos(vec![repo("ripgrep"), repo("tokio")]));
    api.reply("broken", Reply::Status(500));

    controller.submit("rust");
    assert!(controller.wait_for_completion(WAIT));

    controller.submit("broken");
    assert!(controller.wait_for_completion(WAIT));

    let state = controller.state();
    assert_eq!(state.results.len(), 2);
    assert!(!state.loading);
    assert!(state.error.as_deref().unwrap_or("").contains("500"));
    assert!(matches!(controller.view(), SearchView::Failed(_)));

    let toast = controller.notifications().latest().expect("toast raised");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.title, "Search Error");
}

#[test]
fn retry_after_failure_recovers() {
    let (api, mut controller) = setup();
    api.reply("flaky", Reply::Status(503));

    controller.submit("flaky");
    assert!(controller.wait_for_completion(WAIT));
    assert!(controller.state().error.is_some());

    api.reply("flaky", Reply::Repos(vec![repo("flaky")]));
    controller.retry();
    assert!(controller.wait_for_completion(WAIT));

    assert!(controller.state().error.is_none());
    assert_eq!(titles(&controller), vec!["flaky"]);
    assert_eq!(api.calls(), vec!["flaky", "flaky"]);
}

#[test]
fn loading_spans_the_request() {
    let (api, mut controller) = setup();
    api.reply("slow", Reply::Repos(vec![repo("slow")]));
    let release = api.gate("slow");

    controller.submit("slow");
    assert!(controller.state().loading);
    assert!(controller.is_in_flight());
    assert!(matches!(controller.view(), SearchView::Loading));

    release.send(()).unwrap();
    assert!(controller.wait_for_completion(WAIT));
    assert!(!controller.state().loading);
    assert!(!controller.is_in_flight());
}

#[test]
fn stale_response_never_overwrites_newer_query() {
    let (api, mut controller) = setup();
    api.reply("old", Reply::Repos(vec![repo("old")]));
    api.reply("new", Reply::Repos(vec![repo("new")]));
    let release_old = api.gate("old");

    controller.submit("old");
    controller.submit("new");
    assert!(controller.wait_for_completion(WAIT));
    assert_eq!(titles(&controller), vec!["new"]);

    release_old.send(()).unwrap();
    wait_for_answers(&api, 2);

    assert!(!controller.tick(Instant::now()));
    assert_eq!(titles(&controller), vec!["new"]);
    assert!(!controller.state().loading);
}

#[test]
fn typing_during_request_abandons_it() {
    let (api, mut controller) = setup();
    api.reply("rea", Reply::Repos(vec![repo("rea")]));
    api.reply("react", Reply::Repos(vec![repo("react")]));
    let release_rea = api.gate("rea");

    let t0 = Instant::now();
    controller.on_input_change("rea", t0);
    controller.tick(t0 + QUIET);
    assert!(controller.state().loading);

    let typed = t0 + QUIET + Duration::from_millis(50);
    controller.on_input_change("react", typed);
    assert_eq!(controller.state().query, "react");
    assert!(!controller.state().loading);
    assert!(!controller.is_in_flight());
    assert!(controller.is_pending());
    assert!(matches!(controller.view(), SearchView::Loading));

    // "rea" answers while "react" is still waiting out its quiet window
    release_rea.send(()).unwrap();
    wait_for_answers(&api, 1);
    controller.tick(typed + Duration::from_millis(100));
    assert!(controller.state().results.is_empty());
    assert!(controller.is_pending());

    controller.tick(typed + QUIET);
    assert!(controller.wait_for_completion(WAIT));
    assert_eq!(titles(&controller), vec!["react"]);
    assert_eq!(api.calls(), vec!["rea", "react"]);
}

#[test]
fn blank_input_abandons_request_in_flight() {
    let (api, mut controller) = setup();
    api.reply("rust", Reply::Repos(vec![repo("ripgrep")]));
    let release_rust = api.gate("rust");

    controller.submit("rust");
    assert!(controller.state().loading);

    let t0 = Instant::now();
    controller.on_input_change("   ", t0);
    controller.tick(t0 + QUIET);

    release_rust.send(()).unwrap();
    wait_for_answers(&api, 1);
    controller.tick(t0 + QUIET + Duration::from_millis(10));

    assert!(controller.state().results.is_empty());
    assert!(!controller.state().loading);
    assert!(matches!(controller.view(), SearchView::Idle));
    assert_eq!(controller.requests_issued(), 1);
}

#[test]
fn blank_submit_abandons_request_in_flight() {
    let (api, mut controller) = setup();
    api.reply("rust", Reply::Repos(vec![repo("ripgrep")]));
    let release_rust = api.gate("rust");

    controller.submit("rust");
    controller.submit("  ");
    assert!(!controller.is_in_flight());

    release_rust.send(()).unwrap();
    wait_for_answers(&api, 1);
    assert!(!controller.tick(Instant::now()));

    assert!(controller.state().results.is_empty());
    assert!(!controller.state().loading);
    assert!(matches!(controller.view(), SearchView::Idle));
}

#[test]
fn teardown_cancels_pending_search() {
    let (api, mut controller) = setup();

    let t0 = Instant::now();
    controller.on_input_change("rust", t0);
    assert!(controller.is_pending());

    controller.teardown();
    assert!(!controller.is_pending());
    controller.tick(t0 + Duration::from_secs(1));

    assert!(api.calls().is_empty());
    assert!(!controller.state().loading);
}

#[test]
fn empty_array_shows_no_matches() {
    let (api, mut controller) = setup();

    controller.submit("zzzznotfound");
    assert!(controller.wait_for_completion(WAIT));

    assert_eq!(api.calls(), vec!["zzzznotfound"]);
    assert!(matches!(controller.view(), SearchView::NoMatches));
}
