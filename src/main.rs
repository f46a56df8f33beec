use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::{debug, error, warn};

use logswan::geo::{GeoLocator, MaxMindLocator, NoGeoLocator};
use logswan::logging::init_logging;
use logswan::{analyze, report, Input};

#[derive(Parser, Debug)]
#[command(
    name = "logswan",
    version,
    about = "Fast web log analyzer using probabilistic data structures"
)]
struct Cli {
    /// Access log to analyze, `-` reads standard input
    input: Option<String>,

    /// MaxMind country or city database used to resolve visitor countries
    #[arg(short, long, env = "LOGSWAN_GEOIP_DB")]
    geoip_db: Option<PathBuf>,

    /// Print the report on a single line
    #[arg(short, long)]
    compact: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    verbose: bool,
}

/// Settings of one run, resolved from the command line and environment.
#[derive(Debug)]
struct Config {
    input: Input,
    geoip_db: Option<PathBuf>,
    compact: bool,
}

impl Cli {
    /// `None` when no input was given and only the usage banner should be shown.
    fn into_config(self) -> Option<Config> {
        let input = Input::from_arg(&self.input?);
        Some(Config {
            input,
            geoip_db: self.geoip_db,
            compact: self.compact,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(config) = cli.into_config() else {
        // usage banner on a bare invocation
        if let Err(e) = Cli::command().print_help() {
            error!("failed to print usage: {e}");
        }
        return ExitCode::SUCCESS;
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    debug!(?config, "starting");

    let geo = open_geo(config.geoip_db.as_deref());
    let results = analyze(&config.input, geo.as_ref())?;
    let rendered = report::render(&results, config.compact)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write report")?;
    Ok(())
}

/// Open the geolocation database; a missing or unreadable one disables country statistics.
fn open_geo(path: Option<&Path>) -> Box<dyn GeoLocator> {
    let Some(path) = path else {
        debug!("no geoip database configured");
        return Box::new(NoGeoLocator);
    };
    match MaxMindLocator::open(path) {
        Ok(locator) => Box::new(locator),
        Err(e) => {
            warn!("{:#}", anyhow::Error::from(e));
            Box::new(NoGeoLocator)
        }
    }
}
