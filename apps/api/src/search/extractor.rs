//! Result Extractor — turns one raw search item into a `Candidate`, or nothing.
//!
//! Profile pages title themselves `"<name> - <job title> | <site>"`. Anything
//! else is not a candidate and is skipped silently. Duplicate detection is the
//! accumulator's job; extraction is pure and order-preserving.

use std::sync::LazyLock;

use regex::Regex;

use crate::search::models::{Candidate, SearchItem, SearchPage};

static PROFILE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*-\s*(.*?)\s*\|").expect("profile title pattern"));

/// Splits a profile page title into `(name, job_title)`.
pub fn parse_profile_title(page_title: &str) -> Option<(String, String)> {
    let caps = PROFILE_TITLE.captures(page_title)?;
    let name = caps.get(1)?.as_str().trim().to_string();
    let job_title = caps.get(2)?.as_str().trim().to_string();
    Some((name, job_title))
}

/// Builds a candidate from a raw item.
///
/// Skips the item when `link` or `title` is missing, when the Open-Graph
/// title is absent, or when that title does not have the profile shape.
pub fn extract_candidate(raw: &serde_json::Value) -> Option<Candidate> {
    let item = SearchItem::from_value(raw)?;
    let link = item.link.as_deref().filter(|l| !l.is_empty())?;
    item.title.as_deref().filter(|t| !t.is_empty())?;

    let page_title = item.og_title()?;
    let (name, job_title) = parse_profile_title(page_title)?;

    Some(Candidate {
        page_title: page_title.to_string(),
        link: link.to_string(),
        name,
        job_title,
    })
}

/// All well-formed candidates on a page, in page order.
pub fn extract_page(page: &SearchPage) -> impl Iterator<Item = Candidate> + '_ {
    page.items.iter().filter_map(extract_candidate)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(link: &str, og_title: &str) -> serde_json::Value {
        json!({
            "link": link,
            "title": og_title,
            "pagemap": { "metatags": [{ "og:title": og_title }] }
        })
    }

    #[test]
    fn test_parse_standard_profile_title() {
        let parsed = parse_profile_title("Jane Doe - Senior Engineer | LinkedIn");
        assert_eq!(
            parsed,
            Some(("Jane Doe".to_string(), "Senior Engineer".to_string()))
        );
    }

    #[test]
    fn test_parse_title_without_separator_is_none() {
        assert_eq!(parse_profile_title("No Separator Here"), None);
    }

    #[test]
    fn test_parse_title_without_pipe_is_none() {
        assert_eq!(parse_profile_title("Jane Doe - Senior Engineer"), None);
    }

    #[test]
    fn test_parse_splits_on_first_dash_only() {
        let parsed = parse_profile_title("Jean-Luc Picard - Captain - Enterprise | LinkedIn");
        assert_eq!(
            parsed,
            Some(("Jean".to_string(), "Luc Picard - Captain - Enterprise".to_string()))
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse_profile_title("  Ada Lovelace   -   Analyst   | Site");
        assert_eq!(
            parsed,
            Some(("Ada Lovelace".to_string(), "Analyst".to_string()))
        );
    }

    #[test]
    fn test_extract_candidate_from_well_formed_item() {
        let raw = item("https://example.com/in/jane", "Jane Doe - Senior Engineer | LinkedIn");
        let candidate = extract_candidate(&raw).unwrap();
        assert_eq!(candidate.name, "Jane Doe");
        assert_eq!(candidate.job_title, "Senior Engineer");
        assert_eq!(candidate.link, "https://example.com/in/jane");
        assert_eq!(candidate.page_title, "Jane Doe - Senior Engineer | LinkedIn");
    }

    #[test]
    fn test_extract_skips_missing_link_or_title() {
        let no_link = json!({
            "title": "x",
            "pagemap": { "metatags": [{ "og:title": "Jane Doe - Engineer | LinkedIn" }] }
        });
        let no_title = json!({
            "link": "https://example.com/in/jane",
            "pagemap": { "metatags": [{ "og:title": "Jane Doe - Engineer | LinkedIn" }] }
        });
        assert!(extract_candidate(&no_link).is_none());
        assert!(extract_candidate(&no_title).is_none());
    }

    #[test]
    fn test_extract_skips_missing_metatags() {
        let raw = json!({ "link": "https://example.com/in/jane", "title": "Jane" });
        assert!(extract_candidate(&raw).is_none());
    }

    #[test]
    fn test_extract_skips_unexpected_shapes() {
        let raw = json!({
            "link": "https://example.com/in/jane",
            "title": "Jane",
            "pagemap": { "metatags": "not-an-array" }
        });
        assert!(extract_candidate(&raw).is_none());
    }

    #[test]
    fn test_extract_page_preserves_order_and_drops_malformed() {
        let page = SearchPage {
            items: vec![
                item("https://example.com/in/b", "Bob - Designer | LinkedIn"),
                item("https://example.com/in/x", "Company page"),
                item("https://example.com/in/a", "Alice - Architect | LinkedIn"),
            ],
        };
        let names: Vec<_> = extract_page(&page).map(|c| c.name).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }
}
