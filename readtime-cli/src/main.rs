use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use readtime::{CustomComponent, Estimator};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;
use crate::error::AppError;
use crate::input::Source;
use crate::report::{OutputFormat, RenderOptions, Report};

mod config;
mod error;
mod input;
mod report;

/// Estimate how long it takes to read Markdown content
#[derive(Debug, Parser)]
#[command(name = "readtime", version, about)]
struct Cli {
    /// Files to estimate. Reads standard input when none are given, or for `-`
    files: Vec<PathBuf>,

    /// Configuration directory, containing `settings.toml`
    #[arg(short, long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Reading speed in words per minute
    #[arg(long, value_name = "WORDS")]
    wpm: Option<f64>,

    /// Minutes per line of code
    #[arg(long, value_name = "MINUTES")]
    code_time: Option<f64>,

    /// Minutes per image
    #[arg(long, value_name = "MINUTES")]
    image_time: Option<f64>,

    /// Custom component charged a flat time per opening tag (repeatable)
    #[arg(long = "component", value_name = "NAME=MINUTES", value_parser = config::parse_component)]
    components: Vec<CustomComponent>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Show the time contributed by prose, code, images and components
    #[arg(short, long)]
    breakdown: bool,

    /// Log estimation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    const fn overrides(&self) -> Overrides {
        Overrides {
            words_per_minute: self.wpm,
            code_time_per_line: self.code_time,
            image_time: self.image_time,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_dir = config::config_dir(cli.config.clone())?;
    let mut configuration = config::load(&config_dir, &cli.overrides())?;
    configuration.custom_components.extend(cli.components);
    debug!(?configuration, "loaded configuration");

    let estimator = Estimator::new(configuration)?;

    let sources = Source::from_args(cli.files);
    let options = RenderOptions {
        format: cli.format,
        labelled: sources.len() > 1,
        breakdown: cli.breakdown,
    };

    let mut out = stdout().lock();
    for source in &sources {
        let text = source.read()?;
        let report = Report::new(source, estimator.breakdown(&text));
        writeln!(out, "{}", report.render(options)?)?;
    }

    Ok(())
}
