use std::collections::HashSet;
use tracing::debug;

use crate::domain;
use crate::serp::SerpResult;

/// URLs from both sides that share `domain` without being identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup {
    pub domain: String,
    pub urls: Vec<String>,
}

impl DomainGroup {
    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    fn insert(&mut self, url: &str) {
        if !self.contains(url) {
            self.urls.push(url.to_string());
        }
    }
}

/// Cross-list matches between two result sets.
///
/// Ordering is deterministic: exact matches follow the rank order of the
/// first result set, domain groups appear in the order their first pair is
/// found (first set's rank outer, second set's rank inner), and each group
/// lists its URLs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub exact_matches: Vec<String>,
    pub domain_groups: Vec<DomainGroup>,
}

impl Classification {
    pub fn domain_group_of(&self, url: &str) -> Option<usize> {
        self.domain_groups.iter().position(|g| g.contains(url))
    }
}

/// Compare every URL of `a` with every URL of `b`.
///
/// URLs are compared as literal strings. A URL that is an exact match can
/// also land in a domain group when the other side holds a different URL on
/// the same host.
pub fn classify(a: &SerpResult, b: &SerpResult) -> Classification {
    let mut classification = Classification::default();
    if a.is_empty() || b.is_empty() {
        return classification;
    }

    let b_urls: HashSet<&str> = b.urls().collect();
    let mut seen = HashSet::new();
    for url in a.urls() {
        if b_urls.contains(url) && seen.insert(url) {
            classification.exact_matches.push(url.to_string());
        }
    }

    let b_hosts: Vec<(&str, Option<String>)> =
        b.urls().map(|url| (url, domain::host_of(url))).collect();
    for url_a in a.urls() {
        let Some(host_a) = domain::host_of(url_a) else {
            continue;
        };
        for (url_b, host_b) in &b_hosts {
            if url_a == *url_b || host_b.as_deref() != Some(host_a.as_str()) {
                continue;
            }
            let group = match classification
                .domain_groups
                .iter_mut()
                .position(|g| g.domain == host_a)
            {
                Some(idx) => &mut classification.domain_groups[idx],
                None => {
                    classification.domain_groups.push(DomainGroup {
                        domain: host_a.clone(),
                        urls: Vec::new(),
                    });
                    let last = classification.domain_groups.len() - 1;
                    &mut classification.domain_groups[last]
                }
            };
            group.insert(url_a);
            group.insert(url_b);
        }
    }

    debug!(
        action = "classify",
        component = "classifier",
        exact = classification.exact_matches.len(),
        domain_groups = classification.domain_groups.len(),
        "Classified result sets"
    );

    classification
}
