use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;

use crate::palette;
use crate::provider::{self, FileProvider, Query};
use crate::report::{self, AnnotatedEntry, CompareOptions, ComparisonReport};
use crate::utils::{format_similarity, kind_label};
use crate::Args;

fn query(args: &Args, keyword: &str) -> Query {
    Query {
        keyword: keyword.to_string(),
        locale: args.locale.clone(),
        language: args.language.clone(),
        device: args.device,
    }
}

pub fn run_comparison(args: &Args) -> Result<ComparisonReport> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "comparison", "Starting keyword comparison");

    let keyword1 = args.keyword1.as_deref().context("--keyword1 is required")?.trim();
    let keyword2 = args.keyword2.as_deref().context("--keyword2 is required")?.trim();
    let payload1 = args.payload1.as_ref().context("--payload1 is required")?;
    let payload2 = args.payload2.as_ref().context("--payload2 is required")?;

    let provider = FileProvider::new()
        .with_file(keyword1, payload1)
        .with_file(keyword2, payload2);
    let (raw1, raw2) =
        provider::fetch_pair(&provider, &query(args, keyword1), &query(args, keyword2))?;

    let palette = palette::load_palette(args.palette.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let options = CompareOptions {
        limit: args.limit,
        top_k: args.top_k,
    };
    let report = report::compare(&raw1, &raw2, keyword1, keyword2, &options, &palette, &mut rng);

    info!(
        action = "complete",
        component = "comparison",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Comparison completed successfully"
    );
    Ok(report)
}

fn print_entries(keyword: &str, entries: &[AnnotatedEntry]) {
    println!("\nResults for \"{}\":", keyword);
    if entries.is_empty() {
        println!("  (no results)");
        return;
    }
    for entry in entries {
        let color = entry.color.as_deref().unwrap_or("-");
        println!(
            "{:>3}. [{:<6} {:<7}] {}",
            entry.entry.rank,
            kind_label(entry.kind),
            color,
            entry.entry.url
        );
        if !entry.entry.title.is_empty() {
            println!("      {}", entry.entry.title);
        }
    }
}

fn print_ngrams(label: &str, counts: &[crate::ngram::NgramCount]) {
    if counts.is_empty() {
        return;
    }
    println!("\nTop {}:", label);
    for count in counts {
        println!("- {}: {}", count.phrase(), count.count);
    }
}

pub fn print_report(report: &ComparisonReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "\n--- SERP Similarity: \"{}\" vs \"{}\" ---",
        report.keyword1, report.keyword2
    );
    println!("Similarity: {}", format_similarity(report.similarity));
    println!(
        "Exact matches: {}, domain groups: {}",
        report.exact_match_count,
        report.groups.len() - report.exact_match_count
    );

    print_entries(&report.keyword1, &report.entries1);
    print_entries(&report.keyword2, &report.entries2);

    print_ngrams("unigrams", &report.ngrams.unigrams);
    print_ngrams("bigrams", &report.ngrams.bigrams);
    print_ngrams("trigrams", &report.ngrams.trigrams);
    Ok(())
}
