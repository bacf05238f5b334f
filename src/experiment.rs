//! Run persistence and the batch seed harness.
//!
//! The engine itself performs no IO; this module is its first consumer.
//! One run produces a directory of JSON artifacts plus a markdown
//! summary; a batch appends one row per run to an aggregate CSV table
//! whose columns form the stable cross-experiment contract:
//!
//! `timestamp, exp_tag, seed, profit, total_revenue, production_cost,
//! wage_cost, penalty, utilization_rate, on_time_rate, penalty_rate,
//! run_dir`

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::models::{FitnessConfig, Order, Scenario};
use crate::search::{solve, RunResult, SearchParams};
use crate::validation::ValidationError;

/// Failures of the persistence layer.
#[derive(Debug)]
pub enum ExperimentError {
    /// Filesystem failure.
    Io(io::Error),
    /// JSON artifact serialization failure.
    Json(serde_json::Error),
    /// CSV table failure.
    Csv(csv::Error),
    /// The engine rejected the input before searching.
    InvalidInput(Vec<ValidationError>),
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::Io(e) => write!(f, "io error: {e}"),
            ExperimentError::Json(e) => write!(f, "json error: {e}"),
            ExperimentError::Csv(e) => write!(f, "csv error: {e}"),
            ExperimentError::InvalidInput(errors) => {
                write!(f, "invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ExperimentError {}

impl From<io::Error> for ExperimentError {
    fn from(e: io::Error) -> Self {
        ExperimentError::Io(e)
    }
}

impl From<serde_json::Error> for ExperimentError {
    fn from(e: serde_json::Error) -> Self {
        ExperimentError::Json(e)
    }
}

impl From<csv::Error> for ExperimentError {
    fn from(e: csv::Error) -> Self {
        ExperimentError::Csv(e)
    }
}

/// One row of the aggregate batch table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unix seconds when the row was written.
    pub timestamp: u64,
    /// Experiment tag (method/version annotation).
    pub exp_tag: String,
    /// Seed of the run.
    pub seed: u64,
    /// Net profit.
    pub profit: f64,
    /// Revenue over delivered units.
    pub total_revenue: f64,
    /// Production cost over delivered units.
    pub production_cost: f64,
    /// Wage cost over active slots.
    pub wage_cost: f64,
    /// Lateness penalty.
    pub penalty: f64,
    /// Busy time / total capacity.
    pub utilization_rate: f64,
    /// Fraction of orders fully delivered on time.
    pub on_time_rate: f64,
    /// Fraction of orders incurring the penalty.
    pub penalty_rate: f64,
    /// Directory holding the run's artifacts.
    pub run_dir: String,
}

impl RunRecord {
    fn from_result(exp_tag: &str, result: &RunResult, run_dir: String) -> Self {
        Self {
            timestamp: unix_timestamp(),
            exp_tag: exp_tag.to_string(),
            seed: result.params.seed,
            profit: result.metrics.profit,
            total_revenue: result.metrics.total_revenue,
            production_cost: result.metrics.production_cost,
            wage_cost: result.metrics.wage_cost,
            penalty: result.metrics.penalty,
            utilization_rate: result.metrics.utilization_rate,
            on_time_rate: result.metrics.on_time_rate,
            penalty_rate: result.metrics.penalty_rate,
            run_dir,
        }
    }
}

/// Creates run directories and writes per-run artifacts.
pub struct RunLogger {
    base_dir: PathBuf,
}

impl RunLogger {
    /// A logger rooted at `base_dir` (created on first use).
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates `run-<ts>_<tag>_seed<seed>/` under the base directory.
    pub fn create_run_dir(&self, tag: &str, seed: u64) -> Result<PathBuf, ExperimentError> {
        let run_dir = self
            .base_dir
            .join(format!("run-{}_{}_seed{}", unix_timestamp(), tag, seed));
        fs::create_dir_all(&run_dir)?;
        Ok(run_dir)
    }

    /// Writes the full artifact set for one run.
    pub fn persist_run(
        &self,
        run_dir: &Path,
        scenario: &Scenario,
        orders: &[Order],
        fitness_config: &FitnessConfig,
        result: &RunResult,
    ) -> Result<(), ExperimentError> {
        write_json(&run_dir.join("scenario.json"), scenario)?;
        write_json(&run_dir.join("orders.json"), &orders)?;
        write_json(&run_dir.join("fitness.json"), fitness_config)?;
        write_json(&run_dir.join("schedule.json"), &result.schedule)?;
        write_json(&run_dir.join("metrics.json"), &result.metrics)?;
        write_summary(&run_dir.join("summary.md"), scenario, result)?;
        Ok(())
    }
}

/// Runs the engine once per seed, persists each run, and appends one row
/// per run to `batch_<tag>_summary.csv` under `runs_dir`.
pub fn run_batch(
    scenario: &Scenario,
    orders: &[Order],
    fitness_config: &FitnessConfig,
    params: &SearchParams,
    seeds: &[u64],
    exp_tag: &str,
    runs_dir: &Path,
) -> Result<Vec<RunRecord>, ExperimentError> {
    let logger = RunLogger::new(runs_dir);
    fs::create_dir_all(runs_dir)?;
    let summary_csv = runs_dir.join(format!("batch_{exp_tag}_summary.csv"));

    let mut records = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        let mut run_params = params.clone();
        run_params.seed = seed;

        let result = solve(scenario, orders, fitness_config, &run_params)
            .map_err(ExperimentError::InvalidInput)?;

        let run_dir = logger.create_run_dir(exp_tag, seed)?;
        logger.persist_run(&run_dir, scenario, orders, fitness_config, &result)?;

        let record = RunRecord::from_result(exp_tag, &result, run_dir.display().to_string());
        append_summary_row(&summary_csv, &record)?;
        records.push(record);
    }
    Ok(records)
}

/// Appends one record to the aggregate table, writing the header when the
/// file does not exist yet.
pub fn append_summary_row(csv_path: &Path, record: &RunRecord) -> Result<(), ExperimentError> {
    let exists = csv_path.exists();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(!exists)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExperimentError> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

fn write_summary(path: &Path, scenario: &Scenario, result: &RunResult) -> Result<(), ExperimentError> {
    let metrics = &result.metrics;
    let text = format!(
        "# Run summary — {}\n\n\
         ## Key metrics\n\n\
         - profit: {:.2}\n\
         - total_revenue: {:.2}\n\
         - production_cost: {:.2}\n\
         - wage_cost: {:.2}\n\
         - penalty: {:.2}\n\
         - utilization_rate: {:.3}\n\
         - on_time_rate: {:.3}\n\
         - penalty_rate: {:.3}\n\n\
         ## Scenario\n\n\
         - capacity_per_slot: {}\n\
         - horizon_slots: {}\n\
         - wage_per_slot: {}\n\
         - wage_multipliers: {:?}\n",
        result.params.algorithm.tag(),
        metrics.profit,
        metrics.total_revenue,
        metrics.production_cost,
        metrics.wage_cost,
        metrics.penalty,
        metrics.utilization_rate,
        metrics.on_time_rate,
        metrics.penalty_rate,
        scenario.capacity_per_slot,
        scenario.horizon_slots,
        scenario.wage_per_slot,
        scenario.wage_multipliers,
    );
    fs::write(path, text)?;
    Ok(())
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
