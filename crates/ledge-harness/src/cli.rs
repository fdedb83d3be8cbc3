// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line front end.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::golden::{first_divergence, Golden};
use crate::record::run_scenario;
use crate::scenario::Scenario;

/// Ledge determinism harness.
#[derive(Debug, Parser)]
#[command(name = "ledge-harness", version)]
#[command(about = "Run Ledge scenarios and check per-tick state hashes")]
pub struct Cli {
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Harness subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scenario and optionally check against a golden file
    Run {
        /// Path to the scenario JSON
        scenario: PathBuf,
        /// Golden hash file to verify against
        #[arg(long)]
        golden: Option<PathBuf>,
        /// Directory for a reproduction bundle on failure
        #[arg(long)]
        emit_repro: Option<PathBuf>,
    },
    /// Run a scenario and write its golden hash file
    Record {
        /// Path to the scenario JSON
        scenario: PathBuf,
        /// Output golden file
        #[arg(long)]
        out: PathBuf,
    },
    /// Run a scenario repeatedly to detect non-determinism
    Torture {
        /// Path to the scenario JSON
        scenario: PathBuf,
        /// Number of runs, including the baseline
        #[arg(long, default_value_t = 20)]
        runs: u32,
        /// Directory for a reproduction bundle on failure
        #[arg(long)]
        emit_repro: Option<PathBuf>,
    },
}

/// Parses the process arguments and runs the chosen command.
pub fn entrypoint() -> Result<()> {
    execute(Cli::parse())
}

/// Runs an already-parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            scenario,
            golden,
            emit_repro,
        } => run(&scenario, golden.as_deref(), emit_repro.as_deref()),
        Commands::Record { scenario, out } => record(&scenario, &out),
        Commands::Torture {
            scenario,
            runs,
            emit_repro,
        } => torture(&scenario, runs, emit_repro.as_deref()),
    }
}

fn run(path: &Path, golden: Option<&Path>, repro: Option<&Path>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let outcome = run_scenario(&scenario)?;
    let Some(golden_path) = golden else {
        info!(ticks = outcome.hashes.len(), "run complete");
        return Ok(());
    };

    let expected = Golden::load(golden_path)?;
    if let Err(divergence) = expected.verify(&outcome.hashes) {
        let msg = divergence.to_string();
        fail(path, &scenario.name, &outcome.hashes, &expected, &msg, repro)?;
    }
    info!(ticks = outcome.hashes.len(), "golden verified");
    Ok(())
}

fn record(path: &Path, out: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let outcome = run_scenario(&scenario)?;
    let golden = Golden::new(&scenario.name, outcome.hashes);
    golden.save(out)?;
    info!(ticks = golden.hashes_hex.len(), out = %out.display(), "golden recorded");
    Ok(())
}

fn torture(path: &Path, runs: u32, repro: Option<&Path>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(runs, scenario = %path.display(), "torture starting");
    let baseline = run_scenario(&scenario).context("baseline run failed")?;
    let reference = Golden::new(&scenario.name, baseline.hashes);

    for i in 2..=runs {
        let outcome = run_scenario(&scenario).with_context(|| format!("run {i} failed"))?;
        if let Some(divergence) = first_divergence(&reference.hashes_hex, &outcome.hashes) {
            let msg = format!("divergence in run {i}: {divergence}");
            fail(path, &scenario.name, &outcome.hashes, &reference, &msg, repro)?;
        }
        if i % 10 == 0 {
            info!(done = i, runs, "runs clean so far");
        }
    }
    info!(runs, "torture complete, all runs identical");
    Ok(())
}

/// Emits a repro bundle if asked to, then fails with `msg`.
fn fail(
    scenario_path: &Path,
    name: &str,
    actual: &[String],
    expected: &Golden,
    msg: &str,
    repro: Option<&Path>,
) -> Result<()> {
    if let Some(dir) = repro {
        write_repro_bundle(dir, scenario_path, name, actual, expected, msg)?;
        warn!(dir = %dir.display(), "repro bundle written");
        bail!("{msg}\nrepro bundle emitted to {}", dir.display());
    }
    bail!("{msg}");
}

/// Writes the scenario, both hash trails, and the failure message to `dir`.
pub fn write_repro_bundle(
    dir: &Path,
    scenario_path: &Path,
    name: &str,
    actual: &[String],
    expected: &Golden,
    msg: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("failed to create repro dir")?;
    fs::copy(scenario_path, dir.join("scenario.json")).context("failed to copy scenario")?;
    Golden::new(name, actual.to_vec()).save(&dir.join("actual.hashes.json"))?;
    expected.save(&dir.join("expected.hashes.json"))?;
    fs::write(dir.join("diff.txt"), msg).context("failed to write diff.txt")?;
    Ok(())
}
