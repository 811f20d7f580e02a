use serde::{Deserialize, Serialize};

/// A structured profile record derived from one search result item.
///
/// `link` is the identity: a run never emits two candidates with the same link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub page_title: String,
    pub link: String,
    pub name: String,
    pub job_title: String,
}

/// Opaque credentials handed to the search API.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub search_engine_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Search API page model
//
// Items are kept raw on the page and typed one at a time, so a single item
// with an unexpected shape is skipped instead of failing the whole page.
// A page that omits `items` is an exhausted query.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    pub link: Option<String>,
    pub title: Option<String>,
    pub pagemap: Option<PageMap>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMap {
    #[serde(default)]
    pub metatags: Vec<MetaTags>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaTags {
    #[serde(rename = "og:title")]
    pub og_title: Option<String>,
}

impl SearchItem {
    /// Types one raw item. Returns `None` when any field has the wrong shape.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// The Open-Graph title from the first metatag block, if the item carries one.
    pub fn og_title(&self) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .og_title
            .as_deref()
    }
}
