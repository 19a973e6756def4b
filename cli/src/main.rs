use chart_test_report::parse_command::{run_parse, ParseArgs};
use clap::{Parser, Subcommand};
use constants::CHART_TEST_REPORT_LOG_ENV;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    version = std::env!("CARGO_PKG_VERSION"),
    name = "chart-test-report",
    about = "Summarize chart test reports written as JUnit, xUnit or NUnit XML",
)]
struct Cli {
    #[arg(short, long, global = true, help = "Show debug-level log messages.")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a report and print a summary of its test results
    Parse(ParseArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose);
    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            tracing::error!("Error: {:?}", e);
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Parse(parse_args) => run_parse(parse_args),
    }
}

fn setup_logger(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(CHART_TEST_REPORT_LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
