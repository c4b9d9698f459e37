use clap::Parser;
use std::path::PathBuf;

use crate::provider::Device;
use crate::report::{DEFAULT_LIMIT, DEFAULT_TOP_K};

#[derive(Parser, Debug)]
#[command(
    name = "serpsim",
    about = "Compare the search results of two keywords and report how similar they are",
    version,
    long_about = None
)]
pub struct Args {
    /// First keyword
    #[arg(long)]
    pub keyword1: Option<String>,

    /// Second keyword
    #[arg(long)]
    pub keyword2: Option<String>,

    /// Saved provider response (JSON) for the first keyword
    #[arg(long)]
    pub payload1: Option<PathBuf>,

    /// Saved provider response (JSON) for the second keyword
    #[arg(long)]
    pub payload2: Option<PathBuf>,

    /// Search engine locale
    #[arg(long, default_value = "google.co.in")]
    pub locale: String,

    /// Result language
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Device to fetch results for
    #[arg(long, value_enum, default_value_t = Device::Desktop)]
    pub device: Device,

    /// Number of results to compare per keyword
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Number of entries per n-gram table
    #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Path to custom palette file
    #[arg(short, long)]
    pub palette: Option<PathBuf>,

    /// Seed for colors generated once the palette runs out
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize palette.txt with the default palette
    #[arg(long)]
    pub init: bool,
}
