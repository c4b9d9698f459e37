use time::macros::format_description;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // UTC: local offsets can't be read once rayon has spawned threads
    let timer = UtcTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_similarity(similarity: f64) -> String {
    format!("{:.2}%", similarity)
}

/// Fixed-width label for a match tag, e.g. in text tables.
pub fn kind_label(kind: crate::report::MatchKind) -> &'static str {
    match kind {
        crate::report::MatchKind::ExactMatch => "exact",
        crate::report::MatchKind::DomainMatch => "domain",
        crate::report::MatchKind::Unique => "unique",
    }
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.init {
        return Ok(());
    }

    let keyword1 = args.keyword1.as_deref().map(str::trim).unwrap_or_default();
    let keyword2 = args.keyword2.as_deref().map(str::trim).unwrap_or_default();
    if keyword1.is_empty() || keyword2.is_empty() {
        anyhow::bail!("Please enter both keywords (--keyword1 and --keyword2)");
    }
    if keyword1 == keyword2 {
        anyhow::bail!("--keyword1 and --keyword2 must differ");
    }

    if args.payload1.is_none() || args.payload2.is_none() {
        anyhow::bail!("--payload1 and --payload2 are required");
    }

    Ok(())
}
