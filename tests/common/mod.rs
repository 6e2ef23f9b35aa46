//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use most_popular::{
    ApiCredentials, ArticlesSnapshot, HttpRequest, HttpResponse, MostPopularClient, Transport,
    TransportFailure,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// API key used by every test client
pub const TEST_API_KEY: &str = "test-key";

/// Base URL used with transports that never touch the network
pub const FAKE_BASE_URL: &str = "https://api.example.com/svc/mostpopular/v2";

/// Path prefix of FAKE_BASE_URL, as seen by the transport
pub const FAKE_PATH_PREFIX: &str = "/svc/mostpopular/v2";

/// Build a one-article response body with the given id and title
pub fn single_article_body(id: i64, title: &str) -> String {
    format!(
        concat!(
            r#"{{"status":"OK","num_results":1,"results":[{{"id":{},"title":"{}","#,
            r#""url":"https://www.nytimes.com/{}.html","published_date":"2025-08-27"}}]}}"#,
        ),
        id, title, id
    )
}

/// Sample API responses for testing
pub mod api_responses {
    /// Minimal body from the documented scenario
    pub const MINIMAL: &str = r#"{"results":[{"id":1,"title":"T","url":"http://x"}]}"#;

    /// Realistic viewed response with envelope and extra fields
    pub const MOST_VIEWED: &str = r#"{
        "status": "OK",
        "copyright": "Copyright (c) 2025 The New York Times Company.  All Rights Reserved.",
        "num_results": 2,
        "results": [
            {
                "uri": "nyt://article/1",
                "url": "https://www.nytimes.com/2025/08/27/us/politics/story-one.html",
                "id": 100000010351231,
                "asset_id": 100000010351231,
                "source": "New York Times",
                "published_date": "2025-08-27",
                "updated": "2025-08-28 09:41:13",
                "section": "U.S.",
                "byline": "By Jane Reporter",
                "type": "Article",
                "title": "Story One",
                "abstract": "First story.",
                "media": []
            },
            {
                "url": "https://www.nytimes.com/2025/08/26/world/story-two.html",
                "id": 100000010349876,
                "published_date": "2025-08-26",
                "byline": "",
                "title": "Story Two"
            }
        ]
    }"#;

    /// Body whose results do not match the article shape
    pub const WRONG_SHAPE: &str = r#"{"results":[{"id":"not-a-number","title":"T"}]}"#;
}

/// Client over an arbitrary test transport
pub fn client_with(transport: Arc<dyn Transport>) -> MostPopularClient {
    MostPopularClient::new(transport, FAKE_BASE_URL, ApiCredentials::new(TEST_API_KEY))
}

/// Transport whose responses are released by the test, one gate per call
///
/// Calls are matched to gates by URL path in registration order. A call
/// with no registered gate fails immediately.
#[derive(Default)]
pub struct GatedTransport {
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<HttpResponse>>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register the next response for a path relative to FAKE_BASE_URL
    pub fn gate(&self, relative_path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(format!("{}{}", FAKE_PATH_PREFIX, relative_path))
            .or_default()
            .push_back(rx);
        tx
    }

    /// Paths requested so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let path = request.url.path().to_string();
        self.calls.lock().unwrap().push(path.clone());

        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front);

        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| TransportFailure::new("gate dropped")),
            None => Err(TransportFailure::new(format!("no gate for {}", path))),
        }
    }
}

/// Wait for the first snapshot matching `predicate`, failing after 5 seconds
pub async fn wait_for<F>(
    rx: &mut mpsc::UnboundedReceiver<ArticlesSnapshot>,
    predicate: F,
) -> ArticlesSnapshot
where
    F: Fn(&ArticlesSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = rx.recv().await.expect("articles store stopped");
            if predicate(&snapshot) {
                return snapshot;
            }
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

/// Give spawned fetch tasks time to report back
pub async fn let_tasks_settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}
