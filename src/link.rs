//! Pagination `Link` header parsing.
//!
//! Sentry paginates its event feed through the `Link` response header, a
//! comma-separated list of entries shaped like:
//!
//! ```text
//! <https://sentry.io/api/...>; rel="previous"; results="false"; cursor="1478885085000:0:1",
//! <https://sentry.io/api/...>; rel="next"; results="true"; cursor="1478807933000:0:0"
//! ```
//!
//! Only entries with `rel="next"` and `results="true"` point at a further
//! page of results. Entries that do not conform are silently skipped.

/// Relation of a pagination link to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRel {
    /// The following page.
    Next,
    /// The preceding page.
    Previous,
}

/// One parsed entry of a `Link` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Target URL with the enclosing angle brackets stripped.
    pub url: String,
    /// Link relation.
    pub rel: LinkRel,
    /// Whether the target page actually holds further results.
    pub has_results: bool,
}

/// Parse a raw `Link` header into its well-formed entries.
///
/// Entries without a `<url>` part or a recognized `rel` are dropped; a
/// missing or unrecognized `results` attribute is treated as `false`.
pub fn parse_link_header(raw: &str) -> Vec<PageLink> {
    raw.split(", ").filter_map(parse_entry).collect()
}

/// Extract the URLs of every entry pointing at a further page of results,
/// in header order.
pub fn next_page_urls(raw: &str) -> Vec<String> {
    parse_link_header(raw)
        .into_iter()
        .filter(|link| link.rel == LinkRel::Next && link.has_results)
        .map(|link| link.url)
        .collect()
}

fn parse_entry(entry: &str) -> Option<PageLink> {
    let mut parts = entry.split("; ");

    let url_part = parts.next()?.trim();
    let url = url_part
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))?;

    let mut rel = None;
    let mut has_results = false;
    for part in parts {
        match part.trim() {
            "rel=\"next\"" => rel = Some(LinkRel::Next),
            "rel=\"previous\"" => rel = Some(LinkRel::Previous),
            "results=\"true\"" => has_results = true,
            // cursor="..." and anything unrecognized carries no pagination
            // signal
            _ => {}
        }
    }

    Some(PageLink {
        url: url.to_string(),
        rel: rel?,
        has_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "<https://x/?cursor=2>; rel=\"next\"; results=\"true\", \
                          <https://x/?cursor=0>; rel=\"previous\"; results=\"false\"";

    #[test]
    fn test_parse_both_entries() {
        let links = parse_link_header(SAMPLE);
        assert_eq!(
            links,
            vec![
                PageLink {
                    url: "https://x/?cursor=2".to_string(),
                    rel: LinkRel::Next,
                    has_results: true,
                },
                PageLink {
                    url: "https://x/?cursor=0".to_string(),
                    rel: LinkRel::Previous,
                    has_results: false,
                },
            ]
        );
    }

    #[test]
    fn test_only_next_with_results_qualifies() {
        assert_eq!(next_page_urls(SAMPLE), vec!["https://x/?cursor=2"]);
    }

    #[test]
    fn test_next_without_results_is_skipped() {
        let raw = "<https://x/?cursor=9>; rel=\"next\"; results=\"false\"";
        assert!(next_page_urls(raw).is_empty());
    }

    #[test]
    fn test_cursor_attribute_is_ignored() {
        let raw = "<https://x/?a=1>; rel=\"next\"; results=\"true\"; cursor=\"1478807933000:0:0\"";
        assert_eq!(next_page_urls(raw), vec!["https://x/?a=1"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        // No angle brackets, no rel, empty entry: none should survive.
        let raw = "https://x/; rel=\"next\"; results=\"true\", \
                   <https://y/>; results=\"true\", ";
        assert!(parse_link_header(raw).is_empty());
    }

    #[test]
    fn test_empty_header() {
        assert!(parse_link_header("").is_empty());
        assert!(next_page_urls("").is_empty());
    }

    #[test]
    fn test_multiple_next_links_keep_order() {
        let raw = "<https://x/?p=1>; rel=\"next\"; results=\"true\", \
                   <https://x/?p=2>; rel=\"next\"; results=\"true\"";
        assert_eq!(
            next_page_urls(raw),
            vec!["https://x/?p=1", "https://x/?p=2"]
        );
    }
}
