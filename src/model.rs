//! Raw record schema for the content store.
//!
//! These types mirror what the query endpoint returns, before any display
//! resolution. Every field the authoring side may leave blank is an
//! `Option` here — absent, empty, and zero are three different states, and
//! consumers branch on presence explicitly rather than leaning on falsy
//! coercion. The view layer ([`crate::view`]) is the only place fallbacks
//! are applied.

use serde::Deserialize;

/// A slug object: the human-facing URL segment, unique within its type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// A tag on an article. `label` is what renders; `value` is the stable key
/// and must be unique within one article's tag list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub label: String,
    pub value: String,
}

/// An opaque image reference. Only [`crate::image`] knows how to turn the
/// inner asset ref into a URL; nothing else inspects it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub id: String,
}

/// Article author, dereferenced by the detail query. The name itself is
/// still optional on the authoring side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub name: Option<String>,
}

/// One portable-text block of rich content.
///
/// Only the parts the renderer uses are modeled; unknown block types arrive
/// with a `_type` other than `"block"` and are skipped at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {
    #[serde(rename = "_type")]
    pub kind: String,
    pub style: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
}

/// An inline span within a block. `marks` holds decorators like `strong`
/// and `em`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// List-page projection of an article: `{_id, title, slug, date, image}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Slug,
    pub date: Option<String>,
    pub image: Option<ImageRef>,
}

/// List-page projection of an event: `{_id, name, slug, date}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub slug: Slug,
    pub date: Option<String>,
}

/// Full article record from the detail query.
///
/// `date` is always present because the query coalesces it to `now()`;
/// `doors_open` likewise coalesces to 0 — a real zero, not "missing".
/// `created_at` is the store's own creation timestamp and can be absent on
/// records imported without one.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub slug: Slug,
    #[serde(rename = "_createdAt")]
    pub created_at: Option<String>,
    pub date: String,
    #[serde(rename = "doorsOpen", default)]
    pub doors_open: i64,
    pub author: Option<Author>,
    pub image: Option<ImageRef>,
    pub tags: Option<Vec<Tag>>,
    pub details: Option<Vec<Block>>,
}
