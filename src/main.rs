use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use seed_report::config::Config;
use seed_report::{runner, scenarios};
use tracing::info;

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List the available scenarios
    List,
    /// Run the named scenarios in order
    Run {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Run every scenario
    All,
}

#[derive(Parser, Debug)]
#[command(name = "seed-report")]
#[command(author = "Runar Team")]
#[command(version)]
#[command(about = "Create, seed and report on throwaway SQLite databases", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for database files (overrides the config)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Date treated as today, YYYY-MM-DD (overrides the config)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// More log output; repeat for debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn execute(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    config.apply_overrides(args.dir, args.as_of, args.verbose);
    config.logging.init();

    let selected = match args.command {
        Command::List => {
            let mut stdout = io::stdout().lock();
            for scenario in scenarios::all() {
                writeln!(stdout, "{:<26} {}", scenario.name(), scenario.summary())?;
            }
            return Ok(());
        }
        Command::Run { names } => names
            .iter()
            .map(|name| scenarios::find(name))
            .collect::<seed_report::Result<Vec<_>>>()?,
        Command::All => scenarios::all(),
    };

    info!(
        scenarios = selected.len(),
        dir = %config.output_dir.display(),
        as_of = %config.as_of(),
        "starting run"
    );
    let mut stdout = io::stdout().lock();
    for scenario in &selected {
        runner::run(scenario.as_ref(), &config, &mut stdout)
            .with_context(|| format!("scenario {} failed", scenario.name()))?;
    }
    Ok(())
}
