use mlptopo::config::AppConfig;
use mlptopo::data::CsvConnector;
use mlptopo::engines::generation::RecordingProgressCallback;
use mlptopo::report::RunReport;
use mlptopo::runner::run_search_on;

fn small_search() -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.population_size = 6;
    config.evolution.generations = 2;
    config.evolution.hall_of_fame_size = 2;
    config.evolution.seed = 11;
    config.ml.num_folds = 3;
    config.ml.classifier.max_iter = 30;
    config.ml.classifier.learning_rate_init = 0.01;
    config
}

#[test]
fn test_search_runs_every_generation() {
    let iris = CsvConnector::load_iris().unwrap();
    let config = small_search();
    let mut callback = RecordingProgressCallback::default();

    let run = run_search_on(&iris, &config, &mut callback).unwrap();

    assert_eq!(callback.started, vec![0, 1, 2]);
    assert_eq!(callback.completed.len(), 3);
    assert_eq!(run.outcome.logbook.len(), 3);
    assert_eq!(run.outcome.population.len(), 6);
    assert_eq!(run.outcome.logbook.records()[0].nevals, 6);

    let total: usize = run.outcome.logbook.records().iter().map(|r| r.nevals).sum();
    assert_eq!(callback.evaluations, total);

    for record in run.outcome.logbook.records() {
        assert!((0.0..=1.0).contains(&record.max));
        assert!(record.min <= record.avg && record.avg <= record.max);
    }
}

#[test]
fn test_best_fitness_never_decreases() {
    let iris = CsvConnector::load_iris().unwrap();
    let run = run_search_on(&iris, &small_search(), &mut RecordingProgressCallback::default())
        .unwrap();

    let maxima = run.outcome.logbook.max_series();
    for pair in maxima.windows(2) {
        assert!(pair[1] >= pair[0], "max went from {} to {}", pair[0], pair[1]);
    }

    let (_, best) = run.outcome.best_overall().unwrap();
    assert_eq!(best, maxima[maxima.len() - 1]);
}

#[test]
fn test_same_seed_same_search() {
    let iris = CsvConnector::load_iris().unwrap();
    let config = small_search();

    let first = run_search_on(&iris, &config, &mut RecordingProgressCallback::default()).unwrap();
    let second = run_search_on(&iris, &config, &mut RecordingProgressCallback::default()).unwrap();

    assert_eq!(first.outcome.logbook.max_series(), second.outcome.logbook.max_series());
    assert_eq!(first.outcome.logbook.avg_series(), second.outcome.logbook.avg_series());
    assert_eq!(
        first.outcome.best_overall().map(|b| b.0),
        second.outcome.best_overall().map(|b| b.0)
    );
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let iris = CsvConnector::load_iris().unwrap();
    let sequential = small_search();
    let mut parallel = small_search();
    parallel.evolution.parallel_evaluation = true;

    let a = run_search_on(&iris, &sequential, &mut RecordingProgressCallback::default()).unwrap();
    let b = run_search_on(&iris, &parallel, &mut RecordingProgressCallback::default()).unwrap();

    assert_eq!(a.outcome.logbook.max_series(), b.outcome.logbook.max_series());
    assert_eq!(a.outcome.logbook.avg_series(), b.outcome.logbook.avg_series());
}

#[test]
fn test_report_written_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let iris = CsvConnector::load_iris().unwrap();
    let mut config = small_search();
    config.output.report_path = Some(path.clone());

    let run = run_search_on(&iris, &config, &mut RecordingProgressCallback::default()).unwrap();
    assert!(path.exists());

    let report = RunReport::read_json(&path).unwrap();
    assert_eq!(report.dataset.n_samples, 150);
    assert_eq!(report.dataset.n_features, 4);
    assert_eq!(report.dataset.class_names.len(), 3);
    assert_eq!(report.logbook.len(), 3);
    assert_eq!(report.hall_of_fame.len(), run.report.hall_of_fame.len());
    assert!(report.finished_at >= report.started_at);

    if let Some(best) = report.hall_of_fame.first() {
        assert_eq!(best.rank, 1);
        assert!(best.topology.starts_with('('));
    }
    let shares: f64 = report.hall_of_fame.iter().map(|e| e.share_pct).sum();
    assert!((shares - 100.0).abs() < 1e-6 || shares == 0.0);
}

#[test]
fn test_invalid_config_is_rejected_before_searching() {
    let iris = CsvConnector::load_iris().unwrap();
    let mut config = small_search();
    config.evolution.hall_of_fame_size = 6;

    let mut callback = RecordingProgressCallback::default();
    assert!(run_search_on(&iris, &config, &mut callback).is_err());
    assert!(callback.started.is_empty());
}
