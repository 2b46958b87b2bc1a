use crate::config::AppConfig;
use crate::data::{self, Dataset};
use crate::engines::evaluation::MlpLayersEvaluator;
use crate::engines::generation::{EvolutionEngine, EvolutionOutcome, ProgressCallback};
use crate::error::Result;
use crate::report::{hall_of_fame_entries, DatasetSummary, RunReport};
use chrono::Utc;

/// A finished search together with its report
pub struct SearchRun {
    pub outcome: EvolutionOutcome,
    pub report: RunReport,
}

/// Load the configured dataset and search it
pub fn run_search<C: ProgressCallback>(config: &AppConfig, callback: &mut C) -> Result<SearchRun> {
    config.validate()?;
    let dataset = data::load_configured(&config.data)?;
    run_search_on(&dataset, config, callback)
}

/// Search hidden-layer topologies for `dataset`, writing the JSON report if configured
pub fn run_search_on<C: ProgressCallback>(
    dataset: &Dataset,
    config: &AppConfig,
    callback: &mut C,
) -> Result<SearchRun> {
    config.validate()?;
    let started_at = Utc::now();

    let evaluator = MlpLayersEvaluator::new(dataset, config.ml.clone())?;
    let mut engine = EvolutionEngine::new(config.evolution.clone(), evaluator)?;
    let outcome = engine.run(callback)?;

    let report = RunReport {
        started_at,
        finished_at: Utc::now(),
        config: config.clone(),
        dataset: DatasetSummary::from(dataset),
        logbook: outcome.logbook.clone(),
        hall_of_fame: hall_of_fame_entries(&outcome.hall_of_fame),
    };

    if let Some(path) = &config.output.report_path {
        report.write_json(path)?;
    }

    Ok(SearchRun { outcome, report })
}
