use anyhow::Result;
use clap::Parser;
use tracing::error;

use serpsim::{cli, init_default_palette, utils, Args};

fn run(args: &Args) -> Result<()> {
    utils::validate_args(args)?;

    if args.init {
        return init_default_palette();
    }

    let report = cli::run_comparison(args)?;
    cli::print_report(&report, args)
}

fn main() {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!(action = "error", component = "main", error = %format!("{e:#}"), "serpsim failed");
        std::process::exit(1);
    }
}
