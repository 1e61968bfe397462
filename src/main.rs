//! `bp-dupcheck` command line interface

use anyhow::{Context, Result};
use bp_dupcheck::export::{self, write_to_path};
use bp_dupcheck::input;
use bp_dupcheck::normalize::parse_ignore_list;
use bp_dupcheck::{Matcher, MatcherConfig, MatchResultSet, Session, SummaryStatistics};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bp-dupcheck")]
#[command(version, about = "Find likely duplicate Business Partner records by name similarity")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match records from a CSV file with BP_Number, Name1 and Name2 columns
    Check(CheckArgs),
    /// Write the built-in example dataset as CSV
    Example {
        /// Output path
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Input CSV file
    input: PathBuf,

    /// TOML config file (CLI flags take precedence)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Comma-separated ignore words, replacing the built-in list
    #[arg(long)]
    ignore_words: Option<String>,

    /// Minimum similarity score (0-100) for a candidate
    #[arg(long)]
    min_score: Option<f64>,

    /// Number of candidates kept per record
    #[arg(long, short = 'n')]
    top_n: Option<usize>,

    /// Write the matching results table to this CSV file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write the summary report to this CSV file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write results and summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Spread the scan across all cores
    #[arg(long)]
    parallel: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &CheckArgs) -> Result<MatcherConfig> {
    let mut config = match &args.config {
        Some(path) => MatcherConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatcherConfig::default(),
    };
    if let Some(words) = &args.ignore_words {
        config.ignore_words = Some(parse_ignore_list(words));
    }
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    config.validate().context("invalid matching options")?;
    Ok(config)
}

fn run_scan(session: &Session, config: &MatcherConfig, parallel: bool) -> Result<MatchResultSet> {
    let options = config.match_options();
    if parallel {
        return session
            .find_matches_parallel(&options)
            .context("matching failed");
    }

    let mut scan = session.scan(&options).context("matching failed")?;
    let step = (scan.total() / 10).max(1);
    for progress in scan.by_ref() {
        if progress.completed % step == 0 || progress.completed == progress.total {
            info!(
                completed = progress.completed,
                total = progress.total,
                "matching {:.0}%",
                progress.percent()
            );
        }
    }
    Ok(scan.finish())
}

fn print_summary(stats: &SummaryStatistics) {
    println!("BP Duplicate Check - Summary");
    for (label, value) in export::summary_rows(stats) {
        println!("  {:<32} {}", label, value);
    }
}

fn check(args: CheckArgs) -> Result<()> {
    let config = build_config(&args)?;
    let rows = input::read_rows_from_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let session = Matcher::from_config(&config).load(rows);
    let results = run_scan(&session, &config, args.parallel)?;
    let stats = results.summary();

    if let Some(path) = &args.output {
        write_to_path(path, |w| export::write_results_csv(&results, w))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "results exported");
    }
    if let Some(path) = &args.summary {
        write_to_path(path, |w| export::write_summary_csv(&stats, w))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        write_to_path(path, |w| export::write_json(&results, Some(&stats), w))
            .with_context(|| format!("writing {}", path.display()))?;
    }

    print_summary(&stats);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check(args) => check(args),
        Command::Example { output } => {
            let file = std::fs::File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            input::write_example_csv(file)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "example file created");
            Ok(())
        }
    }
}
