use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

/// One lookup against a result provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub keyword: String,
    /// Search engine locale such as `google.co.in`.
    pub locale: String,
    pub language: String,
    pub device: Device,
}

/// Source of raw ranked results. Transport, auth, retries and timeouts are
/// the provider's business; the comparison only sees the returned payload.
pub trait ResultProvider: Sync {
    fn fetch(&self, query: &Query) -> Result<Value>;
}

/// Serves payloads saved as JSON files, one file per keyword.
#[derive(Debug, Clone, Default)]
pub struct FileProvider {
    files: HashMap<String, PathBuf>,
}

impl FileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, keyword: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.insert(keyword.into(), path.into());
        self
    }
}

impl ResultProvider for FileProvider {
    fn fetch(&self, query: &Query) -> Result<Value> {
        let start_time = Instant::now();
        let Some(path) = self.files.get(&query.keyword) else {
            anyhow::bail!("No payload file registered for keyword '{}'", query.keyword);
        };
        if !path.exists() {
            anyhow::bail!("Payload file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {:?}", path))?;
        let payload: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse payload file {:?} as JSON", path))?;

        info!(
            action = "fetch",
            component = "file_provider",
            keyword = %query.keyword,
            locale = %query.locale,
            language = %query.language,
            device = ?query.device,
            file_path = ?path,
            duration_ms = start_time.elapsed().as_millis(),
            "Loaded provider payload"
        );
        Ok(payload)
    }
}

/// Run both lookups in parallel and wait for both.
pub fn fetch_pair<P: ResultProvider + ?Sized>(
    provider: &P,
    first: &Query,
    second: &Query,
) -> Result<(Value, Value)> {
    let (a, b) = rayon::join(|| provider.fetch(first), || provider.fetch(second));
    let a = a.with_context(|| format!("Fetching results for '{}'", first.keyword))?;
    let b = b.with_context(|| format!("Fetching results for '{}'", second.keyword))?;
    Ok((a, b))
}
