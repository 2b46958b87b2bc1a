use mlptopo::config::{ClassifierConfig, MLConfig};
use mlptopo::data::CsvConnector;
use mlptopo::engines::evaluation::{FitnessFunction, MlpLayersEvaluator};
use mlptopo::{Topology, TopologyError};

/// Short training so the suite stays quick; convergence is not required.
fn quick_ml_config() -> MLConfig {
    MLConfig {
        classifier: ClassifierConfig {
            max_iter: 40,
            learning_rate_init: 0.01,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_accuracy_is_a_probability() {
    let iris = CsvConnector::load_iris().unwrap();
    let evaluator = MlpLayersEvaluator::new(&iris, quick_ml_config()).unwrap();
    assert_eq!(evaluator.n_folds(), 5);

    let accuracy = evaluator.evaluate(&[10.4, 20.2, -5.0, 15.0]).unwrap();
    assert!((0.0..=1.0).contains(&accuracy), "accuracy {}", accuracy);
}

#[test]
fn test_evaluation_is_deterministic() {
    let iris = CsvConnector::load_iris().unwrap();
    let evaluator = MlpLayersEvaluator::new(&iris, quick_ml_config()).unwrap();
    let chromosome = [8.2, 5.1, 3.0, -4.0];

    let first = evaluator.evaluate(&chromosome).unwrap();
    let second = evaluator.evaluate(&chromosome).unwrap();
    assert_eq!(first, second);

    // A second evaluator with the same seed draws the same folds
    let other = MlpLayersEvaluator::new(&iris, quick_ml_config()).unwrap();
    assert_eq!(other.evaluate(&chromosome).unwrap(), first);
}

#[test]
fn test_cross_validation_reports_every_fold() {
    let iris = CsvConnector::load_iris().unwrap();
    // At the default learning rate 40 epochs never let the loss settle
    let mut config = MLConfig::default();
    config.classifier.max_iter = 40;
    let evaluator = MlpLayersEvaluator::new(&iris, config).unwrap();

    let result = evaluator.cross_validate(&Topology(vec![6, 4])).unwrap();
    assert_eq!(result.fold_scores.len(), 5);
    assert!(result.fold_scores.iter().all(|s| (0.0..=1.0).contains(s)));
    let mean = result.fold_scores.iter().sum::<f64>() / 5.0;
    assert!((result.mean_accuracy - mean).abs() < 1e-12);
    assert_eq!(result.unconverged_folds, 5);
}

#[test]
fn test_full_training_learns_iris() {
    let iris = CsvConnector::load_iris().unwrap();
    let mut config = MLConfig::default();
    config.classifier.learning_rate_init = 0.01;
    let evaluator = MlpLayersEvaluator::new(&iris, config).unwrap();

    let result = evaluator.cross_validate(&Topology(vec![15, 10])).unwrap();
    // Far above the 1/3 of a constant guess
    assert!(result.mean_accuracy > 0.5, "accuracy {}", result.mean_accuracy);
}

#[test]
fn test_non_positive_first_layer_is_an_error() {
    let iris = CsvConnector::load_iris().unwrap();
    let evaluator = MlpLayersEvaluator::new(&iris, quick_ml_config()).unwrap();

    let result = evaluator.evaluate(&[0.3, -2.0, 0.0, 0.0]);
    assert!(matches!(result, Err(TopologyError::InvalidTopology { .. })));
}

#[test]
fn test_format_params() {
    let iris = CsvConnector::load_iris().unwrap();
    let evaluator = MlpLayersEvaluator::new(&iris, quick_ml_config()).unwrap();
    assert_eq!(
        evaluator.format_params(&[10.4, -1.0, 0.0, 0.0]),
        "hidden_layer_sizes=(10,)"
    );
}
