//! HTTP surface: routes, handlers, and the error-to-status mapping.
//!
//! Two routes, matching the source site:
//! - `GET /` — article and event listings
//! - `GET /articles/{slug}` — article detail
//!
//! Each request is an independent, stateless unit of work: run the queries,
//! resolve a view model, render, respond. The only shared state is the
//! connection config and the HTTP client, both read-only. On the list page
//! the two queries have no data dependency and run concurrently; the page
//! joins on both before rendering.
//!
//! ## Response contract
//!
//! - `/` is always 200, even with zero items in both sections.
//! - An unknown article slug is 404 with the branded not-found page, never
//!   a partially rendered article. Unknown paths hit the same page via the
//!   router fallback.
//! - Any retrieval failure is 500 with a generic error page; the cause is
//!   logged here and goes no further. No retries, no partial pages.
//! - Successful pages carry a `Cache-Control: s-maxage=..,
//!   stale-while-revalidate` header — the revalidation window is enforced
//!   by whatever cache sits in front, not by this binary.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use maud::Markup;
use tower_http::trace::TraceLayer;

use crate::client::{ContentClient, ContentError};
use crate::config::StudioConfig;
use crate::model::{Article, ArticleSummary, Event};
use crate::query;
use crate::render;
use crate::view::{ArticleCard, ArticlePage, EventCard};

/// Shared, read-only state behind every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: StudioConfig,
    client: ContentClient,
}

impl AppState {
    pub fn new(config: StudioConfig, client: ContentClient) -> AppState {
        AppState {
            inner: Arc::new(Inner { config, client }),
        }
    }

    fn config(&self) -> &StudioConfig {
        &self.inner.config
    }

    fn client(&self) -> &ContentClient {
        &self.inner.client
    }
}

/// How a page render can terminate early.
enum PageFailure {
    /// No record for the requested slug (or no route at all) — expected,
    /// user-facing, 404.
    NotFound,
    /// The content store could not be queried — unexpected, 500, logged.
    Retrieval(ContentError),
}

impl From<ContentError> for PageFailure {
    fn from(err: ContentError) -> Self {
        PageFailure::Retrieval(err)
    }
}

impl IntoResponse for PageFailure {
    fn into_response(self) -> Response {
        match self {
            PageFailure::NotFound => (
                StatusCode::NOT_FOUND,
                Html(render::render_not_found().into_string()),
            )
                .into_response(),
            PageFailure::Retrieval(err) => {
                tracing::error!("content retrieval failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::render_error().into_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/articles/:slug", get(article))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Result<Response, PageFailure> {
    // Independent queries, fan out and join. Either failing fails the page.
    let events_query = query::events();
    let articles_query = query::articles();
    let (events, articles) = tokio::try_join!(
        state.client().fetch::<Vec<Event>>(&events_query, &[]),
        state
            .client()
            .fetch::<Vec<ArticleSummary>>(&articles_query, &[]),
    )?;

    let articles: Vec<ArticleCard> = articles
        .unwrap_or_default()
        .into_iter()
        .map(|a| ArticleCard::build(state.config(), a))
        .collect();
    let events: Vec<EventCard> = events
        .unwrap_or_default()
        .into_iter()
        .map(EventCard::build)
        .collect();

    Ok(page_response(&state, render::render_index(&articles, &events)))
}

async fn article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, PageFailure> {
    // The slug is opaque: passed verbatim as a query parameter, never
    // validated. Anything that matches nothing is simply not found.
    let record: Article = state
        .client()
        .fetch(&query::article_by_slug(), &[("slug", slug.as_str())])
        .await?
        .ok_or(PageFailure::NotFound)?;

    let page = ArticlePage::build(state.config(), record);
    Ok(page_response(&state, render::render_article(&page)))
}

async fn fallback() -> PageFailure {
    PageFailure::NotFound
}

/// Wrap rendered markup in a 200 response with the revalidation header.
fn page_response(state: &AppState, markup: Markup) -> Response {
    let cache_control = format!(
        "s-maxage={}, stale-while-revalidate",
        state.config().revalidate_secs
    );
    (
        [(header::CACHE_CONTROL, cache_control)],
        Html(markup.into_string()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = PageFailure::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn retrieval_failure_maps_to_500() {
        let err = ContentError::Api {
            status: 401,
            body: "unauthorized".to_string(),
        };
        let response = PageFailure::Retrieval(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn page_response_carries_revalidation_header() {
        let config = StudioConfig {
            project_id: "p".to_string(),
            revalidate_secs: 60,
            ..StudioConfig::default()
        };
        let client = ContentClient::new(&config).unwrap();
        let state = AppState::new(config, client);
        let response = page_response(&state, maud::html! { p { "ok" } });
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "s-maxage=60, stale-while-revalidate"
        );
    }
}
