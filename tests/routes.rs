//! End-to-end route tests.
//!
//! The app under test talks to a stub content store running in-process on a
//! loopback port. The stub answers the query endpoint's contract — GROQ
//! text and JSON-encoded params in the query string, `{"result": ...}`
//! envelope out — from canned fixtures, so these tests exercise the full
//! retrieve → resolve → render pipeline without any external dependency.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use gazette::client::ContentClient;
use gazette::config::StudioConfig;
use gazette::server::{AppState, router};

/// Canned content for one stub store instance.
#[derive(Clone, Default)]
struct StubStore {
    events: Value,
    articles: Value,
    by_slug: HashMap<String, Value>,
    fail: bool,
}

async fn query_handler(
    State(store): State<StubStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if store.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "store down").into_response();
    }
    let groq = params.get("query").cloned().unwrap_or_default();
    let result = if groq.contains("$slug") {
        // Param values arrive JSON-encoded.
        let slug: String = params
            .get("$slug")
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        store.by_slug.get(&slug).cloned().unwrap_or(Value::Null)
    } else if groq.contains("\"event\"") {
        store.events.clone()
    } else {
        store.articles.clone()
    };
    Json(json!({ "result": result })).into_response()
}

/// Start the stub store on a loopback port; returns its endpoint URL.
async fn spawn_store(store: StubStore) -> String {
    let app = Router::new()
        .route("/", get(query_handler))
        .with_state(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Build the app under test, wired to a stub store.
async fn app_with(store: StubStore) -> Router {
    let endpoint = spawn_store(store).await;
    let config = StudioConfig {
        project_id: "testproj".to_string(),
        ..StudioConfig::default()
    };
    let client = ContentClient::with_base_url(endpoint).unwrap();
    router(AppState::new(config, client))
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap(), cache_control)
}

fn populated_store() -> StubStore {
    let mut by_slug = HashMap::new();
    by_slug.insert(
        "launch-day".to_string(),
        json!({
            "_id": "a1",
            "title": "Launch day",
            "slug": {"current": "launch-day"},
            "_createdAt": "2024-02-10T12:30:00Z",
            "date": "2024-02-11T00:00:00Z",
            "doorsOpen": 30,
            "author": {"name": "Robin"},
            "image": {"asset": {"_ref": "image-abc123-2000x1000-jpg"}},
            "tags": [
                {"label": "News", "value": "news"},
                {"label": "Launch", "value": "launch"}
            ],
            "details": [{
                "_type": "block",
                "style": "normal",
                "children": [{"text": "Doors at noon.", "marks": []}]
            }]
        }),
    );
    by_slug.insert(
        "anonymous".to_string(),
        json!({
            "_id": "a2",
            "slug": {"current": "anonymous"},
            "date": "2024-02-12T00:00:00Z"
        }),
    );
    StubStore {
        events: json!([
            {"_id": "e1", "name": "Meetup", "slug": {"current": "meetup"}, "date": "2024-05-04"}
        ]),
        articles: json!([
            {
                "_id": "a1",
                "title": "Launch day",
                "slug": {"current": "launch-day"},
                "date": "2024-02-11T00:00:00Z",
                "image": {"asset": {"_ref": "image-abc123-2000x1000-jpg"}}
            },
            {"_id": "a2", "slug": {"current": "anonymous"}}
        ]),
        by_slug,
        fail: false,
    }
}

#[tokio::test]
async fn index_lists_articles_and_events() {
    let app = app_with(populated_store()).await;
    let (status, body, _) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Launch day"));
    assert!(body.contains(r#"href="/articles/launch-day""#));
    assert!(body.contains("Meetup"));
    assert!(body.contains(r#"href="/events/meetup""#));
    // Imaged article resolves through the CDN; imageless one gets the
    // placeholder.
    assert!(body.contains("https://cdn.sanity.io/images/testproj/production/abc123-2000x1000.jpg"));
    assert!(body.contains("https://via.placeholder.com/550x310"));
}

#[tokio::test]
async fn index_with_no_content_is_200_with_empty_sections() {
    let store = StubStore {
        events: json!([]),
        articles: json!([]),
        ..StubStore::default()
    };
    let app = app_with(store).await;
    let (status, body, _) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Articles"));
    assert!(body.contains("Events"));
    assert!(!body.contains("Something went wrong"));
}

#[tokio::test]
async fn index_treats_null_results_as_empty_lists() {
    // StubStore::default() answers both list queries with null.
    let app = app_with(StubStore::default()).await;
    let (status, body, _) = get_page(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Articles"));
    assert!(body.contains("Events"));
}

#[tokio::test]
async fn article_page_renders_full_record() {
    let app = app_with(populated_store()).await;
    let (status, body, _) = get_page(app, "/articles/launch-day").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Launch day</h1>"));
    assert!(body.contains("Author"));
    assert!(body.contains("Robin"));
    assert!(body.contains("Sat Feb 10 2024 12:30:00"));
    assert!(body.contains(r#"data-value="news""#));
    assert!(body.contains(r#"data-value="launch""#));
    assert!(body.contains("Doors at noon."));
    assert!(body.contains("← Back to main"));
}

#[tokio::test]
async fn bare_article_renders_with_every_optional_omitted() {
    let app = app_with(populated_store()).await;
    let (status, body, _) = get_page(app, "/articles/anonymous").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<h1>"));
    assert!(!body.contains("Author"));
    assert!(!body.contains(r#"class="tags""#));
    assert!(!body.contains("article-body"));
    // The page still has its date row and a placeholder image.
    assert!(body.contains("Date created"));
    assert!(body.contains("https://via.placeholder.com/550x310"));
}

#[tokio::test]
async fn unknown_slug_is_404_not_a_partial_page() {
    let app = app_with(populated_store()).await;
    let (status, body, _) = get_page(app, "/articles/nonexistent-slug").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not found"));
    assert!(!body.contains("Date created"));
}

#[tokio::test]
async fn unknown_path_hits_the_branded_404() {
    let app = app_with(populated_store()).await;
    let (status, body, _) = get_page(app, "/events/meetup").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Not found"));
}

#[tokio::test]
async fn store_failure_is_500_with_generic_page() {
    let store = StubStore {
        fail: true,
        ..StubStore::default()
    };
    let app = app_with(store).await;

    let (status, body, _) = get_page(app.clone(), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("store down"));

    let (status, _, _) = get_page(app, "/articles/launch-day").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn successful_pages_advertise_the_revalidation_window() {
    let app = app_with(populated_store()).await;

    let (_, _, cache) = get_page(app.clone(), "/").await;
    assert_eq!(cache.as_deref(), Some("s-maxage=60, stale-while-revalidate"));

    let (_, _, cache) = get_page(app, "/articles/launch-day").await;
    assert_eq!(cache.as_deref(), Some("s-maxage=60, stale-while-revalidate"));
}
