use crate::serp::SerpResult;

/// Share of `first`'s results that also appear in the other list, as a
/// percentage rounded to two decimals.
///
/// The denominator is the first list's length only, so swapping the lists
/// changes the score whenever their lengths differ. An empty first list
/// scores 0.
pub fn similarity(first: &SerpResult, exact_matches: usize) -> f64 {
    if first.is_empty() {
        return 0.0;
    }
    let ratio = 100.0 * exact_matches as f64 / first.len() as f64;
    (ratio * 100.0).round() / 100.0
}
