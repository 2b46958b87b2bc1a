use super::kfold::{DataSplitter, FoldSplit, KFold};
use super::mlp::MlpClassifier;
use crate::config::MLConfig;
use crate::data::Dataset;
use crate::engines::generation::genome::{decode, format_chromosome};
use crate::error::Result;
use crate::types::{Chromosome, Topology};
use rulinalg::matrix::Matrix;

/// Scores a chromosome; higher is better.
pub trait FitnessFunction: Send + Sync {
    fn evaluate(&self, chromosome: &Chromosome) -> Result<f64>;
}

impl<F> FitnessFunction for F
where
    F: Fn(&Chromosome) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, chromosome: &Chromosome) -> Result<f64> {
        self(chromosome)
    }
}

/// Per-fold and mean accuracy of one topology
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    pub topology: Topology,
    pub fold_scores: Vec<f64>,
    pub mean_accuracy: f64,
    /// Folds whose training stopped at `max_iter`
    pub unconverged_folds: usize,
}

struct PreparedFold {
    fold_num: usize,
    train_x: Matrix<f64>,
    train_y: Vec<usize>,
    test_x: Matrix<f64>,
    test_y: Vec<usize>,
}

/// Mean k-fold accuracy of an MLP whose hidden layers come from the chromosome.
///
/// Folds are drawn once, so every chromosome is scored on the same partitions.
pub struct MlpLayersEvaluator {
    config: MLConfig,
    n_classes: usize,
    folds: Vec<PreparedFold>,
}

impl MlpLayersEvaluator {
    pub fn new(dataset: &Dataset, config: MLConfig) -> Result<Self> {
        let splitter = KFold::new(config.num_folds, config.shuffle_folds, config.seed);
        let splits = splitter.split(dataset.n_samples())?;

        let folds = splits
            .into_iter()
            .map(|FoldSplit { train, test, fold_num }| {
                let (train_x, train_y) = dataset.subset(&train);
                let (test_x, test_y) = dataset.subset(&test);
                PreparedFold {
                    fold_num,
                    train_x,
                    train_y,
                    test_x,
                    test_y,
                }
            })
            .collect();

        Ok(Self {
            config,
            n_classes: dataset.n_classes(),
            folds,
        })
    }

    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Train and score a fresh, identically seeded classifier on every fold.
    pub fn cross_validate(&self, topology: &Topology) -> Result<CrossValidationResult> {
        let mut fold_scores = Vec::with_capacity(self.folds.len());
        let mut unconverged_folds = 0;

        for fold in &self.folds {
            let mut classifier =
                MlpClassifier::new(topology, self.config.classifier.clone(), self.config.seed)?;
            let report = classifier.fit(&fold.train_x, &fold.train_y, self.n_classes)?;
            if !report.converged {
                unconverged_folds += 1;
            }

            let score = classifier.score(&fold.test_x, &fold.test_y)?;
            log::debug!(
                "  {} fold {}: accuracy {:.4} after {} epochs",
                topology,
                fold.fold_num,
                score,
                report.n_iter
            );
            fold_scores.push(score);
        }

        let mean_accuracy = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;

        Ok(CrossValidationResult {
            topology: topology.clone(),
            fold_scores,
            mean_accuracy,
            unconverged_folds,
        })
    }

    /// Mean cross-validated accuracy for the decoded chromosome
    pub fn get_accuracy(&self, chromosome: &Chromosome) -> Result<f64> {
        let result = self.cross_validate(&decode(chromosome))?;
        log::trace!(
            "{} -> {:.4} ({} unconverged folds)",
            result.topology,
            result.mean_accuracy,
            result.unconverged_folds
        );
        Ok(result.mean_accuracy)
    }

    pub fn format_params(&self, chromosome: &Chromosome) -> String {
        format_chromosome(chromosome)
    }
}

impl FitnessFunction for MlpLayersEvaluator {
    fn evaluate(&self, chromosome: &Chromosome) -> Result<f64> {
        self.get_accuracy(chromosome)
    }
}
