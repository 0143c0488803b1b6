//! The content store client.
//!
//! One capability: execute a [`Query`] against the hosted query endpoint
//! and get back a typed result, or `None` when nothing matched. Queries go
//! out as GET requests with the GROQ text and JSON-encoded parameters in
//! the query string; responses arrive wrapped in a `{"result": ...}`
//! envelope.
//!
//! The client never retries — a transport or API failure propagates to the
//! caller as a [`ContentError`] and becomes a page-level failure there.
//! Retry and backoff, if wanted, belong to whatever sits in front of the
//! store.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::StudioConfig;
use crate::query::Query;

const LIVE_API_HOST: &str = "api.sanity.io";
const CDN_API_HOST: &str = "apicdn.sanity.io";

/// How a content retrieval can fail. `NotFound` is deliberately not here:
/// an absent record is a successful `Ok(None)`, not an error.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("request to content store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content store returned status {status}")]
    Api { status: u16, body: String },
    #[error("could not decode content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Handle on one content project's query endpoint.
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
}

/// Response envelope from the query endpoint.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: serde_json::Value,
}

impl ContentClient {
    /// Build a client for the configured project.
    ///
    /// `use_cdn` selects the cached edge host; with it off every query hits
    /// the live API and bypasses the read cache.
    pub fn new(config: &StudioConfig) -> Result<ContentClient, ContentError> {
        Self::with_base_url(endpoint_url(config))
    }

    /// Build a client against an explicit endpoint URL. Tests use this to
    /// point the client at a local stub store.
    pub fn with_base_url(base_url: String) -> Result<ContentClient, ContentError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(ContentClient { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a query with the given named parameters.
    ///
    /// Returns `Ok(None)` when the store's result is null — the "no record
    /// matched" case for sliced queries. For list queries an absent result
    /// also comes back as `None`; callers treat it as an empty list.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ContentError> {
        let pairs = query_pairs(query, params);
        let response = self.http.get(&self.base_url).query(&pairs).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        match envelope.result {
            serde_json::Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }
}

/// Query-string pairs for a request: the GROQ text plus one `$name` pair
/// per parameter, values JSON-encoded as the endpoint requires.
fn query_pairs(query: &Query, params: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut pairs = vec![("query".to_string(), query.to_groq())];
    for (name, value) in params {
        pairs.push((
            format!("${name}"),
            serde_json::Value::String((*value).to_string()).to_string(),
        ));
    }
    pairs
}

fn endpoint_url(config: &StudioConfig) -> String {
    let host = if config.use_cdn {
        CDN_API_HOST
    } else {
        LIVE_API_HOST
    };
    format!(
        "https://{}.{host}/v{}/data/query/{}",
        config.project_id, config.api_version, config.dataset
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    fn config() -> StudioConfig {
        StudioConfig {
            project_id: "b124320u".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
            revalidate_secs: 60,
        }
    }

    #[test]
    fn live_endpoint_when_cdn_disabled() {
        assert_eq!(
            endpoint_url(&config()),
            "https://b124320u.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn cdn_endpoint_when_enabled() {
        let cfg = StudioConfig {
            use_cdn: true,
            ..config()
        };
        assert_eq!(
            endpoint_url(&cfg),
            "https://b124320u.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn query_pairs_start_with_groq_text() {
        let pairs = query_pairs(&query::events(), &[]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "query");
        assert!(pairs[0].1.starts_with("*["));
    }

    #[test]
    fn parameters_are_json_encoded() {
        let pairs = query_pairs(&query::article_by_slug(), &[("slug", "launch-day")]);
        assert_eq!(pairs[1], ("$slug".to_string(), "\"launch-day\"".to_string()));
    }

    #[test]
    fn parameter_values_pass_through_verbatim() {
        // Slugs are opaque; nothing normalizes or validates them here.
        let pairs = query_pairs(&query::article_by_slug(), &[("slug", "weird/..slug")]);
        assert_eq!(pairs[1].1, "\"weird/..slug\"");
    }

    #[test]
    fn null_result_envelope_decodes_to_none() {
        let envelope: Envelope = serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert!(envelope.result.is_null());

        let envelope: Envelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(envelope.result.is_null());
    }
}
