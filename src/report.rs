use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

use crate::classify::{self, Classification};
use crate::ngram::{self, NgramStats};
use crate::palette::{self, ColorMap, Palette};
use crate::score;
use crate::serp::{self, ResultEntry, SerpResult};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Results kept per keyword.
    pub limit: usize,
    /// Entries kept per n-gram table.
    pub top_k: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactMatch,
    DomainMatch,
    Unique,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchGroup {
    pub kind: MatchKind,
    /// The shared URL for exact matches, the host for domain matches.
    pub key: String,
    pub members: Vec<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedEntry {
    #[serde(flatten)]
    pub entry: ResultEntry,
    pub kind: MatchKind,
    /// Index into `ComparisonReport::groups`.
    pub group: Option<usize>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub keyword1: String,
    pub keyword2: String,
    pub similarity: f64,
    pub exact_match_count: usize,
    pub groups: Vec<MatchGroup>,
    pub ngrams: NgramStats,
    pub entries1: Vec<AnnotatedEntry>,
    pub entries2: Vec<AnnotatedEntry>,
}

fn build_groups(classification: &Classification, colors: &ColorMap) -> Vec<MatchGroup> {
    let exact = classification.exact_matches.iter().map(|url| MatchGroup {
        kind: MatchKind::ExactMatch,
        key: url.clone(),
        members: vec![url.clone()],
        color: colors.exact.get(url).cloned(),
    });
    let domain = classification.domain_groups.iter().map(|g| MatchGroup {
        kind: MatchKind::DomainMatch,
        key: g.domain.clone(),
        members: g.urls.clone(),
        color: colors.domain.get(&g.domain).cloned(),
    });
    exact.chain(domain).collect()
}

/// Tag each entry with its group in `build_groups` order: exact groups
/// first, then domain groups. The exact tag wins when a URL has both.
fn annotate(
    serp: &SerpResult,
    classification: &Classification,
    colors: &ColorMap,
) -> Vec<AnnotatedEntry> {
    let exact_count = classification.exact_matches.len();
    serp.entries
        .iter()
        .map(|entry| {
            let url = entry.url.as_str();
            let exact = classification.exact_matches.iter().position(|u| u == url);
            let (kind, group) = match (exact, classification.domain_group_of(url)) {
                (Some(idx), _) => (MatchKind::ExactMatch, Some(idx)),
                (None, Some(idx)) => (MatchKind::DomainMatch, Some(exact_count + idx)),
                (None, None) => (MatchKind::Unique, None),
            };
            AnnotatedEntry {
                entry: entry.clone(),
                kind,
                group,
                color: colors.color_for(url, classification).map(str::to_string),
            }
        })
        .collect()
}

/// Build the report for two already-normalized result sets.
pub fn compare_results(
    first: &SerpResult,
    second: &SerpResult,
    top_k: usize,
    palette: &Palette,
    rng: &mut fastrand::Rng,
) -> ComparisonReport {
    let start_time = Instant::now();

    let classification = classify::classify(first, second);
    let colors = palette::assign_colors(&classification, palette, rng);
    let similarity = score::similarity(first, classification.exact_matches.len());
    let ngrams = ngram::analyze(first.titles().chain(second.titles()), top_k);

    let groups = build_groups(&classification, &colors);
    let entries1 = annotate(first, &classification, &colors);
    let entries2 = annotate(second, &classification, &colors);

    info!(
        action = "complete",
        component = "comparison",
        keyword1 = %first.keyword,
        keyword2 = %second.keyword,
        similarity = similarity,
        groups = groups.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Comparison finished"
    );

    ComparisonReport {
        keyword1: first.keyword.clone(),
        keyword2: second.keyword.clone(),
        similarity,
        exact_match_count: classification.exact_matches.len(),
        groups,
        ngrams,
        entries1,
        entries2,
    }
}

/// Normalize two raw provider payloads and compare them.
pub fn compare(
    raw1: &Value,
    raw2: &Value,
    keyword1: &str,
    keyword2: &str,
    options: &CompareOptions,
    palette: &Palette,
    rng: &mut fastrand::Rng,
) -> ComparisonReport {
    let first = serp::normalize(raw1, keyword1, options.limit);
    let second = serp::normalize(raw2, keyword2, options.limit);
    compare_results(&first, &second, options.top_k, palette, rng)
}
