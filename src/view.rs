//! View models: raw records resolved for rendering.
//!
//! Each page render derives a fresh view model from the raw record and
//! discards it afterwards — nothing here is cached or persisted. The point
//! of the layer is that every optional source field is resolved to an
//! explicit fallback *before* markup is built, so the renderer never has to
//! decide what a missing value means:
//!
//! | Source field | When absent |
//! |--------------|-------------|
//! | `title` | heading omitted entirely (no placeholder text) |
//! | `author.name` | author row omitted entirely |
//! | `image` | fixed placeholder URL |
//! | `_createdAt` | current time, formatted like the present case |
//! | `tags` | tags row omitted |
//! | `details` | content block omitted |
//!
//! Blank strings count as absent — an author record with `name: ""` gets no
//! author row, same as no author record at all.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::StudioConfig;
use crate::image::image_url_or_placeholder;
use crate::model::{Article, ArticleSummary, Block, Event, Tag};

/// Width and height requested from the image CDN for article imagery.
pub const ARTICLE_IMAGE_WIDTH: u32 = 550;
pub const ARTICLE_IMAGE_HEIGHT: u32 = 310;

/// Alt text when an article has no title to describe its image.
const FALLBACK_IMAGE_ALT: &str = "Article Image";

/// One article entry on the index page.
#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub id: String,
    pub title: Option<String>,
    pub href: String,
    pub image_url: String,
    pub image_alt: String,
    pub date_label: Option<String>,
}

/// One event entry on the index page.
#[derive(Debug, Clone)]
pub struct EventCard {
    pub id: String,
    pub name: Option<String>,
    pub href: String,
    pub date_label: Option<String>,
}

/// The fully resolved article detail page.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub image_url: String,
    pub image_alt: String,
    pub created_label: String,
    pub tags: Vec<Tag>,
    pub body: Vec<Block>,
}

impl ArticleCard {
    pub fn build(config: &StudioConfig, article: ArticleSummary) -> ArticleCard {
        let image_url = image_url_or_placeholder(
            config,
            article.image.as_ref(),
            ARTICLE_IMAGE_WIDTH,
            ARTICLE_IMAGE_HEIGHT,
        );
        let title = present(article.title);
        ArticleCard {
            id: article.id,
            image_alt: title.clone().unwrap_or_else(|| FALLBACK_IMAGE_ALT.to_string()),
            title,
            href: format!("/articles/{}", article.slug.current),
            image_url,
            date_label: article.date.as_deref().map(date_label),
        }
    }
}

impl EventCard {
    pub fn build(event: Event) -> EventCard {
        EventCard {
            id: event.id,
            name: present(event.name),
            // No event detail page exists; the link lands on the 404
            // fallback, matching the source site.
            href: format!("/events/{}", event.slug.current),
            date_label: event.date.as_deref().map(date_label),
        }
    }
}

impl ArticlePage {
    pub fn build(config: &StudioConfig, article: Article) -> ArticlePage {
        let image_url = image_url_or_placeholder(
            config,
            article.image.as_ref(),
            ARTICLE_IMAGE_WIDTH,
            ARTICLE_IMAGE_HEIGHT,
        );
        let title = present(article.title);
        ArticlePage {
            image_alt: title.clone().unwrap_or_else(|| FALLBACK_IMAGE_ALT.to_string()),
            title,
            author_name: article.author.and_then(|a| present(a.name)),
            image_url,
            created_label: created_label(article.created_at.as_deref(), Utc::now()),
            tags: article.tags.unwrap_or_default(),
            body: article
                .details
                .unwrap_or_default()
                .into_iter()
                .filter(|b| b.kind == "block")
                .collect(),
        }
    }
}

/// Treat blank strings like absent values.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Short date label for list entries, e.g. `3/1/2024`.
///
/// List `date` values arrive either as full timestamps or bare dates.
/// A value that parses as neither is shown verbatim — a malformed date is
/// an authoring problem, not a reason to drop the row.
fn date_label(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%-m/%-d/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%-m/%-d/%Y").to_string();
    }
    raw.to_string()
}

/// "Date created" label for the detail page: date portion + time portion,
/// e.g. `Sat Feb 10 2024 12:30:00`.
///
/// A record without `_createdAt` (or with one that doesn't parse) gets the
/// current time formatted the same way, so the label is one display type in
/// every case.
fn created_label(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    let stamp = created_at
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);
    stamp.format("%a %b %d %Y %H:%M:%S").to_string()
}
