pub mod args;
pub mod classify;
pub mod cli;
pub mod domain;
pub mod ngram;
pub mod palette;
pub mod provider;
pub mod report;
pub mod score;
pub mod serp;
pub mod utils;

pub use args::Args;
pub use classify::{classify, Classification, DomainGroup};
pub use ngram::{analyze, NgramCount, NgramStats};
pub use palette::{
    assign_colors, init_default_palette, load_palette, write_default_palette, ColorMap, Palette,
};
pub use provider::{fetch_pair, Device, FileProvider, Query, ResultProvider};
pub use report::{
    compare, compare_results, AnnotatedEntry, CompareOptions, ComparisonReport, MatchGroup,
    MatchKind,
};
pub use score::similarity;
pub use serp::{normalize, ResultEntry, SerpResult};
