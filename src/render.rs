//! HTML rendering.
//!
//! Pure, stateless transformation of view models into markup — no query
//! ever happens past this point. Uses [maud](https://maud.lambda.xyz/)
//! for compile-time templates: malformed HTML is a build error, all
//! interpolation is auto-escaped, and there is no template directory to
//! ship or get out of sync.
//!
//! ## Pages
//!
//! - **Index** (`/`): an Articles section and an Events section, either of
//!   which may be empty
//! - **Article** (`/articles/{slug}`): image, conditional heading, author
//!   and tag rows, creation date, rich-content body
//! - **Not found**: branded 404, also used as the router fallback
//! - **Error**: generic retrieval-failure page, carries no detail
//!
//! The conditional-display rules live in the view models; this module only
//! renders what is present and skips what is not.

use maud::{DOCTYPE, Markup, html};

use crate::model::{Block, Span};
use crate::view::{ArticleCard, ArticlePage, EventCard};

const CSS: &str = include_str!("../static/style.css");

/// Base HTML document shell shared by every page.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

// ============================================================================
// Index page
// ============================================================================

/// The index page: article cards followed by event cards. Empty lists
/// render as empty sections, never as an error.
pub fn render_index(articles: &[ArticleCard], events: &[EventCard]) -> Markup {
    let content = html! {
        main.index-page {
            h1 { "Articles" }
            ul.card-grid.articles {
                @for article in articles {
                    (render_article_card(article))
                }
            }
            h1 { "Events" }
            ul.card-grid.events {
                @for event in events {
                    (render_event_card(event))
                }
            }
        }
    };
    base_document("Articles", content)
}

fn render_article_card(card: &ArticleCard) -> Markup {
    html! {
        li.card {
            a href=(card.href) {
                img src=(card.image_url) alt=(card.image_alt)
                    width="468" height="60" loading="lazy";
                h2 {
                    @if let Some(title) = &card.title { (title) }
                }
                @if let Some(date) = &card.date_label {
                    p.card-date { (date) }
                }
            }
        }
    }
}

fn render_event_card(card: &EventCard) -> Markup {
    html! {
        li.card {
            a href=(card.href) {
                h2 {
                    @if let Some(name) = &card.name { (name) }
                }
                @if let Some(date) = &card.date_label {
                    p.card-date { (date) }
                }
            }
        }
    }
}

// ============================================================================
// Article page
// ============================================================================

/// The article detail page. Heading, author row, tags row, and body are
/// each omitted entirely when the view model resolved them as absent.
pub fn render_article(page: &ArticlePage) -> Markup {
    let doc_title = page.title.as_deref().unwrap_or("Article");
    let content = html! {
        main.article-page {
            div.back-link {
                a href="/" { "← Back to main" }
            }
            article {
                img.article-image src=(page.image_url) alt=(page.image_alt)
                    width="468" height="60";
                @if let Some(title) = &page.title {
                    h1 { (title) }
                }
                @if let Some(author) = &page.author_name {
                    dl.meta-row {
                        dd { "Author" }
                        dt { (author) }
                    }
                }
                dl.meta-row {
                    dd { "Date created" }
                    dt { (page.created_label) }
                }
                @if !page.tags.is_empty() {
                    div.tags {
                        @for tag in &page.tags {
                            span.tag data-value=(tag.value) { (tag.label) }
                        }
                    }
                }
                @if !page.body.is_empty() {
                    div.article-body {
                        @for block in &page.body {
                            (render_block(block))
                        }
                    }
                }
            }
        }
    };
    base_document(doc_title, content)
}

/// Render one portable-text block. Unknown styles fall back to paragraphs.
fn render_block(block: &Block) -> Markup {
    let spans = html! {
        @for span in &block.children {
            (render_span(span))
        }
    };
    match block.style.as_deref() {
        Some("h1") => html! { h1 { (spans) } },
        Some("h2") => html! { h2 { (spans) } },
        Some("h3") => html! { h3 { (spans) } },
        Some("h4") => html! { h4 { (spans) } },
        Some("blockquote") => html! { blockquote { (spans) } },
        _ => html! { p { (spans) } },
    }
}

fn render_span(span: &Span) -> Markup {
    let strong = span.marks.iter().any(|m| m == "strong");
    let em = span.marks.iter().any(|m| m == "em");
    match (strong, em) {
        (true, true) => html! { strong { em { (span.text) } } },
        (true, false) => html! { strong { (span.text) } },
        (false, true) => html! { em { (span.text) } },
        (false, false) => html! { (span.text) },
    }
}

// ============================================================================
// Terminal pages
// ============================================================================

/// Branded 404 page, for unknown article slugs and unknown routes alike.
pub fn render_not_found() -> Markup {
    let content = html! {
        main.terminal-page {
            h1 { "Not found" }
            p { "There is nothing at this address." }
            p { a href="/" { "← Back to main" } }
        }
    };
    base_document("Not found", content)
}

/// Generic retrieval-failure page. Intentionally says nothing about the
/// cause; the handler logs the detail.
pub fn render_error() -> Markup {
    let content = html! {
        main.terminal-page {
            h1 { "Something went wrong" }
            p { "The content could not be loaded. Try again in a moment." }
            p { a href="/" { "← Back to main" } }
        }
    };
    base_document("Something went wrong", content)
}
