use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One ranked result as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub rank: usize,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerpResult {
    pub keyword: String,
    pub entries: Vec<ResultEntry>,
}

impl SerpResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.url.as_str())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }
}

const RESULT_LIST_KEYS: [&str; 2] = ["organic_results", "results"];
const URL_KEYS: [&str; 2] = ["url", "link"];

fn string_field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| item.get(*key).and_then(Value::as_str))
}

/// Turn a raw provider payload into a ranked `SerpResult`.
///
/// A payload without a results list yields an empty result. The first `limit`
/// provider entries are considered; entries lacking a URL are skipped and the
/// surviving ones are ranked from 1 without gaps.
pub fn normalize(payload: &Value, keyword: &str, limit: usize) -> SerpResult {
    let items = RESULT_LIST_KEYS
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut entries = Vec::with_capacity(items.len().min(limit));
    let mut dropped = 0usize;
    for item in items.iter().take(limit) {
        let Some(url) = string_field(item, &URL_KEYS) else {
            dropped += 1;
            continue;
        };
        let title = string_field(item, &["title"]).unwrap_or_default();
        entries.push(ResultEntry {
            rank: entries.len() + 1,
            url: url.to_string(),
            title: title.to_string(),
        });
    }

    debug!(
        action = "normalize",
        component = "serp",
        keyword = keyword,
        provided = items.len(),
        kept = entries.len(),
        dropped = dropped,
        "Normalized provider payload"
    );

    SerpResult {
        keyword: keyword.to_string(),
        entries,
    }
}
