//! Pagination loop and context processing.
//!
//! The scraper walks an issue's event feed page by page: URLs discovered in
//! `Link` headers go onto a FIFO queue so pages are processed in discovery
//! order, and each page's events contribute their `context` mapping to the
//! accumulated result. A non-200 status stops fetching but keeps whatever
//! was already collected; an unparsable body is fatal.

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::client::{issue_events_url, EventsApi};
use crate::error::{DumpError, Result};
use crate::link;
use crate::literal;

/// Per-event mapping of custom field names to serialized values, in the
/// order the API returned them.
pub type EventContext = IndexMap<String, Value>;

/// One element of the events response body. Everything but the custom
/// context is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    /// Custom context attached by the reporting application.
    pub context: EventContext,
}

/// Scraper over an [`EventsApi`] implementation.
pub struct Scraper<A> {
    api: A,
    max_events: Option<usize>,
}

impl<A: EventsApi> Scraper<A> {
    /// Create a scraper with no event limit.
    pub fn new(api: A) -> Self {
        Self {
            api,
            max_events: None,
        }
    }

    /// Stop fetching further pages once the accumulated event count exceeds
    /// this limit. Events already collected past the limit are kept.
    #[must_use]
    pub fn with_max_events(mut self, max_events: Option<usize>) -> Self {
        self.max_events = max_events;
        self
    }

    /// Collect the event contexts of every reachable page of an issue.
    pub fn scrape(&self, issue: &str) -> Result<Vec<EventContext>> {
        let mut queue: VecDeque<String> = VecDeque::from([issue_events_url(issue)]);
        let mut contexts: Vec<EventContext> = Vec::new();
        let mut pages = 0usize;

        while let Some(url) = queue.pop_front() {
            if let Some(limit) = self.max_events {
                if contexts.len() > limit {
                    debug!("event limit {limit} reached, not fetching {url}");
                    break;
                }
            }

            info!("processing {url}");
            let page = self.api.fetch(&url)?;
            pages += 1;

            if page.status != 200 {
                error!("got non-200 response: {}", page.status);
                break;
            }

            if let Some(raw) = page.link_header.as_deref() {
                queue.extend(link::next_page_urls(raw));
            }

            let events: Vec<IssueEvent> =
                serde_json::from_str(&page.body).map_err(|e| DumpError::body_parse(&url, e))?;
            contexts.extend(events.into_iter().map(|event| event.context));
        }

        info!("{pages} urls processed, {} events collected", contexts.len());
        Ok(contexts)
    }
}

/// Build a new context holding only the requested fields, in the order the
/// source context carried them. A context need not contain every requested
/// field.
#[must_use]
pub fn filter_context(context: &EventContext, fields: &[String]) -> EventContext {
    context
        .iter()
        .filter(|(key, _)| fields.iter().any(|field| field == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Decode every value of a context for output.
///
/// String values go through the restricted literal parser and keep their
/// original text when they are not a recognized literal; other JSON values
/// are rendered as serde_json prints them.
#[must_use]
pub fn decode_context(context: &EventContext) -> IndexMap<String, String> {
    context
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => literal::decode_to_string(s),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}
