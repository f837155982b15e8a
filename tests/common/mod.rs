//! Shared harness for the integration tests: a wiremock backend plus a
//! client wired to recording doubles for navigation and notices.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::json;
use wiremock::MockServer;

use community_client::{
    Client, ClientConfig, MemoryStore, NavigationTarget, Navigator, Notice, NoticeSink,
};

/// [`Navigator`] double that records navigations and titles.
pub struct RecordingNavigator {
    current_path: Mutex<String>,
    navigations: Mutex<Vec<NavigationTarget>>,
    titles: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(current_path: &str) -> Self {
        Self {
            current_path: Mutex::new(current_path.to_string()),
            navigations: Mutex::new(Vec::new()),
            titles: Mutex::new(Vec::new()),
        }
    }

    pub fn set_current_path(&self, path: &str) {
        *self.current_path.lock().unwrap() = path.to_string();
    }

    pub fn navigations(&self) -> Vec<NavigationTarget> {
        self.navigations.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.navigations.lock().unwrap().push(target);
    }

    fn current_path(&self) -> String {
        self.current_path.lock().unwrap().clone()
    }

    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}

/// [`NoticeSink`] double that records every surfaced notice.
#[derive(Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// A client pointed at a fresh mock backend.
pub struct Harness {
    pub server: MockServer,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notices: Arc<RecordingNotices>,
}

/// Start a mock backend and build a client against it.
pub async fn harness() -> Harness {
    // Honour RUST_LOG when debugging a failing test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let server = MockServer::start().await;

    let config = ClientConfig {
        base_url: server.uri(),
        timeout_seconds: 1,
        ..Default::default()
    };

    let store = Arc::new(MemoryStore::new());
    let navigator = Arc::new(RecordingNavigator::new("/"));
    let notices = Arc::new(RecordingNotices::new());

    let client = Client::new(config, store.clone(), navigator.clone())
        .expect("client construction")
        .with_notices(notices.clone());

    Harness {
        server,
        client,
        store,
        navigator,
        notices,
    }
}

/// A successful login envelope for the default test user.
pub fn login_success_body() -> serde_json::Value {
    json!({
        "code": 200,
        "message": "成功",
        "data": {
            "userId": 1,
            "username": "lihua",
            "nickname": "华",
            "avatar": "https://cdn.example.com/lihua.png",
            "role": "USER",
            "token": "jwt-token-1"
        }
    })
}

/// An empty success envelope (void endpoints).
pub fn ok_body() -> serde_json::Value {
    json!({"code": 200, "message": "成功", "data": null})
}

/// The default test credentials.
pub fn credentials() -> community_client::LoginRequest {
    community_client::LoginRequest {
        username: "lihua".to_string(),
        password: "secret".to_string(),
    }
}
