use serde::Serialize;
use std::collections::HashMap;

/// An n-gram and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NgramCount {
    pub tokens: Vec<String>,
    pub count: usize,
}

impl NgramCount {
    pub fn phrase(&self) -> String {
        self.tokens.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NgramStats {
    pub unigrams: Vec<NgramCount>,
    pub bigrams: Vec<NgramCount>,
    pub trigrams: Vec<NgramCount>,
}

impl NgramStats {
    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty() && self.bigrams.is_empty() && self.trigrams.is_empty()
    }
}

/// Lowercase and split on whitespace. Punctuation stays attached to tokens.
pub fn tokenize(title: &str) -> Vec<String> {
    title.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Counts in first-seen order.
#[derive(Default)]
struct Counter {
    index: HashMap<Vec<String>, usize>,
    counts: Vec<NgramCount>,
}

impl Counter {
    fn add(&mut self, tokens: &[String]) {
        match self.index.get(tokens) {
            Some(&idx) => self.counts[idx].count += 1,
            None => {
                self.index.insert(tokens.to_vec(), self.counts.len());
                self.counts.push(NgramCount {
                    tokens: tokens.to_vec(),
                    count: 1,
                });
            }
        }
    }

    fn top(mut self, k: usize) -> Vec<NgramCount> {
        // stable: equal counts keep first-seen order
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts.truncate(k);
        self.counts
    }
}

/// Unigram, bigram and trigram frequencies over `titles`, top `top_k` each.
///
/// N-grams never span two titles.
pub fn analyze<'a, I>(titles: I, top_k: usize) -> NgramStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counters: [Counter; 3] = Default::default();
    for title in titles {
        let tokens = tokenize(title);
        for (n, counter) in (1..=3).zip(counters.iter_mut()) {
            for window in tokens.windows(n) {
                counter.add(window);
            }
        }
    }

    let [unigrams, bigrams, trigrams] = counters;
    NgramStats {
        unigrams: unigrams.top(top_k),
        bigrams: bigrams.top(top_k),
        trigrams: trigrams.top(top_k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(counts: &[NgramCount]) -> Vec<(String, usize)> {
        counts.iter().map(|c| (c.phrase(), c.count)).collect()
    }

    #[test]
    fn red_fox_red_dog() {
        let stats = analyze(["red fox", "red dog"], 10);
        assert_eq!(
            pairs(&stats.unigrams),
            vec![("red".into(), 2), ("fox".into(), 1), ("dog".into(), 1)]
        );
        assert_eq!(
            pairs(&stats.bigrams),
            vec![("red fox".into(), 1), ("red dog".into(), 1)]
        );
        assert!(stats.trigrams.is_empty());
    }

    #[test]
    fn tokenization_is_naive() {
        assert_eq!(tokenize("  Rust,  RUST\tguide! "), vec!["rust,", "rust", "guide!"]);
    }

    #[test]
    fn ngrams_do_not_cross_titles() {
        let stats = analyze(["a b", "c d"], 10);
        let bigrams = pairs(&stats.bigrams);
        assert!(!bigrams.iter().any(|(p, _)| p == "b c"));
        assert_eq!(bigrams.len(), 2);
    }

    #[test]
    fn top_k_truncates_with_stable_ties() {
        let stats = analyze(["x y z w", "w z", "q"], 2);
        // z and w tie at 2, z seen first
        assert_eq!(pairs(&stats.unigrams), vec![("z".into(), 2), ("w".into(), 2)]);
        assert_eq!(
            pairs(&stats.trigrams),
            vec![("x y z".into(), 1), ("y z w".into(), 1)]
        );
    }

    #[test]
    fn empty_input() {
        assert!(analyze(Vec::<&str>::new(), 10).is_empty());
        assert!(analyze(["", "   "], 10).is_empty());
    }

    #[test]
    fn zero_top_k() {
        assert!(analyze(["a b c"], 0).is_empty());
    }
}
