//! Drives one scenario end to end: initialize, seed, report.

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, info_span};

use crate::config::Config;
use crate::error::Result;
use crate::report::Renderer;
use crate::scenarios::{RunContext, Scenario};
use crate::seed::{self, SeedCount};
use crate::sqlite::{Database, ResultSet, SqliteConfig};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub scenario: String,
    pub db_path: PathBuf,
    pub seeded: Vec<SeedCount>,
    /// One result per report, in report order.
    pub results: Vec<ResultSet>,
}

/// Run `scenario` against a fresh database under `config.output_dir`,
/// writing every report to `out`.
///
/// Any existing database file for the scenario is replaced, so repeated runs
/// always start from the same state.
pub fn run(scenario: &dyn Scenario, config: &Config, out: &mut dyn Write) -> Result<RunSummary> {
    let span = info_span!("scenario", name = scenario.name());
    let _enter = span.enter();

    let ctx = RunContext {
        as_of: config.as_of(),
    };
    let db_path = config.output_dir.join(scenario.db_file());
    let sqlite = SqliteConfig::new(&db_path, scenario.schema())
        .with_foreign_keys(scenario.foreign_keys());

    let mut db = Database::initialize(&sqlite)?;
    let seeded = seed::seed(&mut db, &scenario.seeds(&ctx))?;
    info!(
        tables = seeded.len(),
        rows = seeded.iter().map(|s| s.rows).sum::<usize>(),
        "seed complete"
    );

    let renderer = Renderer::new(
        scenario
            .null_placeholder()
            .unwrap_or(config.null_placeholder.as_str()),
    );

    writeln!(out, "=== {} ===", scenario.name())?;
    let reports = scenario.reports(&ctx);
    let mut results = Vec::with_capacity(reports.len());
    for report in &reports {
        let result = report.run(&db)?;
        renderer.render(report, &result, out)?;
        writeln!(out)?;
        results.push(result);
    }
    db.close()?;
    info!(reports = results.len(), "reports complete");

    Ok(RunSummary {
        scenario: scenario.name().to_string(),
        db_path,
        seeded,
        results,
    })
}
