use clap::Parser;
use colored::Colorize;
use deadjar::{ArchiveAnalyzer, ArchiveReport, ClassArchive, Config, TerminalReporter};
use miette::Result;
use std::path::PathBuf;
use tracing::info;

/// deadjar - Dead member detection for compiled JAR archives
#[derive(Parser, Debug)]
#[command(name = "deadjar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JAR archives to analyze
    #[arg(required = true)]
    archives: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional namespace prefixes to exclude from the report
    /// (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("deadjar v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    // Archives are processed strictly sequentially; a failing archive is
    // reported and skipped without stopping the rest of the run
    let mut had_errors = false;
    for archive_path in &cli.archives {
        let mut archive = match ClassArchive::open(archive_path) {
            Ok(archive) => archive,
            Err(error) => {
                eprintln!("{}: {}", "Error".red(), error);
                had_errors = true;
                continue;
            }
        };

        let analysis = ArchiveAnalyzer::new(&config).analyze(&mut archive);
        let report = ArchiveReport::build(archive.path(), &analysis, &config);
        TerminalReporter::new().report(&report);
    }

    if had_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations()?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.excluded_prefixes.extend(cli.exclude.clone());
    }

    Ok(config)
}
