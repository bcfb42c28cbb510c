use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use edutube_bot::services::{MemorySessionStore, SessionStore};
use edutube_bot::{create_app, AppState, Config};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A browser: the app plus whatever session cookie it was handed.
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post(&mut self, uri: &str) -> Response {
        self.send(Request::post(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Walks `/bot` → `/bot/new` and returns the new chat's path.
    async fn open_chat(&mut self) -> String {
        let response = self.get("/bot").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/bot/new");

        let response = self.get("/bot/new").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        location(&response)
    }
}

struct TestContext {
    mock_server: MockServer,
    store: Arc<MemorySessionStore>,
    app: Router,
}

impl TestContext {
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let endpoint = format!("{}/search", mock_server.uri());
        let config = Config::from_lookup(|name| match name {
            "KEY" => Some("test-key".to_string()),
            "SEARCH_ENDPOINT" => Some(endpoint.clone()),
            "SEARCH_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        let store = Arc::new(MemorySessionStore::new());
        let state = AppState::with_store(config, store.clone()).unwrap();

        Self {
            mock_server,
            store,
            app: create_app(state),
        }
    }

    fn browser(&self) -> Browser {
        Browser::new(self.app.clone())
    }

    async fn mock_search(&self, topic: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("engine", "youtube"))
            .and(query_param("search_query", topic))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without location")
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn home_page_renders() {
    let ctx = TestContext::new().await;
    let response = ctx.browser().get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("href=\"/bot\""));
}

#[tokio::test]
async fn new_chat_redirects_into_chat_view() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();

    let chat_path = browser.open_chat().await;
    assert!(chat_path.starts_with("/bot/"));
    assert!(browser.cookie.is_some());

    let response = browser.get(&chat_path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Python Basics"));
    assert!(html.contains("Natural Language Processing"));
    assert_eq!(ctx.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn unknown_chat_redirects_to_new_chat() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();

    let response = browser.get("/bot/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/bot/new");

    browser.open_chat().await;
    let response = browser.get("/bot/does-not-exist").await;
    assert_eq!(location(&response), "/bot/new");

    let response = browser.post_form("/bot/does-not-exist", "topic=Rust").await;
    assert_eq!(location(&response), "/bot/new");
}

#[tokio::test]
async fn chats_are_private_to_their_session() {
    let ctx = TestContext::new().await;
    let mut alice = ctx.browser();
    let chat_path = alice.open_chat().await;

    let mut bob = ctx.browser();
    let response = bob.get(&chat_path).await;
    assert_eq!(location(&response), "/bot/new");
}

#[tokio::test]
async fn forged_cookie_starts_a_fresh_session() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;

    browser.cookie = Some("edutube_session=not-signed".to_string());
    let response = browser.get(&chat_path).await;
    assert_eq!(location(&response), "/bot/new");
}

#[tokio::test]
async fn topic_submission_shows_filtered_videos() {
    let ctx = TestContext::new().await;
    ctx.mock_search(
        "Python Basics tutorial",
        json!({ "video_results": [
            { "title": "Learn Python Basics - Full Course", "link": "https://www.youtube.com/watch?v=abc123&t=5" },
            { "title": "Python Basics movie trailer", "link": "https://youtu.be/xyz789?foo=1" }
        ]}),
    )
    .await;

    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;

    let response = browser
        .post_form(&chat_path, "topic=Python+Basics+tutorial")
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert_eq!(target, format!("{chat_path}?scroll_to_results=True"));

    let html = body_text(browser.get(&target).await).await;
    assert!(html.contains("Here are educational YouTube videos for &#x27;Python Basics tutorial&#x27;:"));
    assert!(html.contains("Learn Python Basics - Full Course"));
    // Slashes are entity-escaped inside attributes
    assert!(html.contains("abc123&#x2f;hqdefault.jpg"));
    assert!(!html.contains("movie trailer"));
    assert!(html.contains("scrollIntoView"));
}

#[tokio::test]
async fn topic_without_results_says_sorry() {
    let ctx = TestContext::new().await;
    ctx.mock_search("xyz123", json!({ "video_results": [] })).await;

    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;
    browser.post_form(&chat_path, "topic=xyz123").await;

    let html = body_text(browser.get(&chat_path).await).await;
    assert!(html.contains("Sorry, I couldn&#x27;t find educational videos for &#x27;xyz123&#x27;."));
    assert!(!html.contains("scrollIntoView"));
}

#[tokio::test]
async fn empty_topic_only_redirects() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;

    let response = browser.post_form(&chat_path, "topic=").await;
    assert_eq!(location(&response), chat_path);
    assert!(ctx.mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn topic_post_without_form_body_only_redirects() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;

    let response = browser.post(&chat_path).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), chat_path);

    let request = Request::post(&chat_path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"topic":"Rust"}"#))
        .unwrap();
    let response = browser.send(request).await;
    assert_eq!(location(&response), chat_path);
    assert!(ctx.mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn cookieless_clients_leave_no_sessions_behind() {
    let ctx = TestContext::new().await;

    for i in 0..250 {
        let response = ctx.browser().get("/bot").await;
        assert_eq!(location(&response), "/bot/new");

        let response = ctx.browser().post(&format!("/delete-chat/x{i}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(ctx.store.count().await.unwrap(), 0);

    // A session that actually opens a chat is kept
    ctx.browser().open_chat().await;
    assert_eq!(ctx.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_chat_is_idempotent() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;
    let chat_id = chat_path.trim_start_matches("/bot/");

    for _ in 0..2 {
        let response = browser.post(&format!("/delete-chat/{chat_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body, json!({ "success": true }));
    }

    let response = browser.get(&chat_path).await;
    assert_eq!(location(&response), "/bot/new");
}

#[tokio::test]
async fn clear_history_removes_all_chats() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let first = browser.open_chat().await;
    let second = browser.open_chat().await;

    let response = browser.post("/clear-chat-history").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["success"], true);

    for chat_path in [first, second] {
        let response = browser.get(&chat_path).await;
        assert_eq!(location(&response), "/bot/new");
    }
}

#[tokio::test]
async fn store_keeps_every_chat_of_a_session() {
    let ctx = TestContext::new().await;
    let mut browser = ctx.browser();
    let first = browser.open_chat().await;
    let second = browser.open_chat().await;
    assert_ne!(first, second);

    let html = body_text(browser.get(&second).await).await;
    assert!(html.contains(&format!("href=\"{first}\"")));
    assert!(html.contains(&format!("href=\"{second}\"")));
    // Still a single session
    assert_eq!(ctx.store.count().await.unwrap(), 1);
    assert!(ctx.store.load("unrelated").await.unwrap().is_none());
}

#[tokio::test]
async fn health_reports_search_counters() {
    let ctx = TestContext::new().await;
    ctx.mock_search("Rust", json!({ "video_results": [{ "title": "Rust course", "link": "https://youtu.be/r" }] }))
        .await;

    let mut browser = ctx.browser();
    let chat_path = browser.open_chat().await;
    browser.post_form(&chat_path, "topic=Rust").await;

    let response = browser.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sessions"], 1);
    assert_eq!(body["metrics"]["searches"], 1);
    assert_eq!(body["metrics"]["videos_kept"], 1);
}
