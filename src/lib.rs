//! # Gazette
//!
//! A small server-rendered website for articles and events. The content
//! lives in a hosted content store (a Sanity-style project); this binary
//! queries it per request, resolves each record into a render-ready view
//! model, and serves HTML.
//!
//! # Architecture: Retrieval → Resolution → Rendering
//!
//! Every page render flows through the same three steps:
//!
//! ```text
//! 1. Retrieve   query the content store     (client + query)
//! 2. Resolve    record → view model         (view + image)
//! 3. Render     view model → markup         (render)
//! ```
//!
//! The middle step is where all the judgement lives: almost every field on
//! a record is optional on the authoring side, and the view layer maps each
//! absent field to an explicit fallback (omit the element, substitute a
//! placeholder image, synthesize a timestamp) so rendering never meets an
//! unresolved value. Steps 2 and 3 are pure functions, which is what makes
//! the pipeline testable without a store.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Explicit connection configuration, built once at startup |
//! | [`client`] | Query execution over HTTP against the store's endpoint |
//! | [`query`] | The three fixed queries as structured filter/projection/sort values |
//! | [`model`] | Raw record schema with explicit optionality |
//! | [`image`] | Pure asset-ref → CDN URL resolution with placeholder fallback |
//! | [`view`] | View models and the field-degradation policy |
//! | [`render`] | Maud page templates: index, article, 404, error |
//! | [`server`] | Axum routes, handlers, status mapping |
//!
//! # Design Decisions
//!
//! ## Structured Queries Over Query Strings
//!
//! The store speaks GROQ, which is text on the wire — but the queries here
//! are built from typed parts and rendered at the last moment. The three
//! queries the site runs are fixed, so the win is not dynamism; it is that
//! their shape is unit-tested and a typo in a projection is a failing test,
//! not a silently empty page.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and templates are plain Rust over the view-model types —
//! no stringly-typed lookups, no template directory to ship.
//!
//! ## No Ambient Connection Config
//!
//! Project, dataset, API version, and the CDN flag are read once in `main`
//! into a [`config::StudioConfig`] and passed to the client and the image
//! resolver explicitly. The resolver stays a pure function and the client
//! can be pointed at a stub store in tests.
//!
//! ## Caching Stays Outside
//!
//! The binary serves every page fresh and attaches a
//! `Cache-Control: s-maxage=.., stale-while-revalidate` header. Staleness
//! tolerance is a contract with whatever CDN or cache sits in front; there
//! is no cache, no invalidation, and no retry logic in here.

pub mod client;
pub mod config;
pub mod image;
pub mod model;
pub mod query;
pub mod render;
pub mod server;
pub mod view;
