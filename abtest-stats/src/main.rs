use abtest_stats::{
    Cli, Config, ExperimentInput, JsonReporter, OutputFormat, Reporter, TerminalReporter,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config and apply CLI overrides
    let mut config = Config::load_or_default(Path::new(&cli.config))?;
    cli.apply_to_config(&mut config);
    debug!(?config, "configuration");

    let frequentist = config
        .analysis
        .frequentist_config()
        .context("Invalid analysis configuration")?;
    let test = config
        .analysis
        .build_test()
        .context("Invalid analysis configuration")?;

    // 1. Load summaries
    eprintln!("Loading {}...", cli.input.display());
    let experiment = ExperimentInput::load(&cli.input)?;

    // 2. Analyze
    eprintln!(
        "Analyzing {} metrics ({} test)...",
        experiment.metrics.len(),
        if config.analysis.sequential {
            "sequential"
        } else {
            "fixed-sample"
        }
    );
    let comparisons = experiment.analyze(test.as_ref());

    // 3. Report
    let reporter: Box<dyn Reporter> = match config.output.format {
        OutputFormat::Table => {
            let reporter = if config.output.color {
                TerminalReporter::new()
            } else {
                TerminalReporter::without_colors()
            };
            Box::new(reporter.with_config(&frequentist))
        }
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };
    reporter.report(&comparisons)?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
